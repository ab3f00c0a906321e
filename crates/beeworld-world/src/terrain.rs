//! Terrain map loading and per-run instantiation.
//!
//! A map file is a CSV table with a header row followed by
//! `kind,x,y,name,color` rows, where `kind` is one of `flower`, `tree`,
//! `water`, or `building`. Rows whose coordinates fall outside the grid are
//! silently dropped (with a debug log); rows whose coordinates do not parse
//! are a load error; rows with an unrecognized kind are ignored.
//!
//! The file is parsed once into a [`TerrainLayout`]. Because the flower
//! nectar stock is a per-run parameter (the sweep varies it), the layout is
//! instantiated into a fresh [`Terrain`] at the start of every run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use beeworld_types::{BarrierKind, Position, TerrainCell};

use crate::error::WorldError;
use crate::flora::{Flower, Tree};
use crate::grid::WorldGrid;

/// Default world-grid width in cells.
pub const WORLD_WIDTH: i32 = 40;

/// Default world-grid height in cells.
pub const WORLD_HEIGHT: i32 = 35;

/// Number of child flowers synthesized for each tree.
const TREE_FLOWER_COUNT: u32 = 3;

/// Color assigned to synthesized tree flowers.
const TREE_FLOWER_COLOR: &str = "red";

/// An impassable cell (water or a building).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    /// Grid cell the barrier occupies.
    pub position: Position,
    /// What kind of obstacle this is.
    pub kind: BarrierKind,
}

/// One validated feature row from the map file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Feature {
    /// A named flower.
    Flower {
        /// Grid cell.
        position: Position,
        /// Name column from the map row.
        name: String,
        /// Color column from the map row.
        color: String,
    },
    /// A tree; child flowers are synthesized at instantiation.
    Tree {
        /// Grid cell.
        position: Position,
    },
    /// A movement-blocking cell.
    Barrier {
        /// Grid cell.
        position: Position,
        /// Water or building.
        kind: BarrierKind,
    },
}

/// A parsed terrain map, ready to be instantiated per run.
///
/// Holds validated, in-bounds feature rows in file order so that repeated
/// runs (the parameter sweep) rebuild identical worlds without re-reading
/// the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainLayout {
    /// Grid width the rows were validated against.
    width: i32,
    /// Grid height the rows were validated against.
    height: i32,
    /// In-bounds features in file order.
    features: Vec<Feature>,
}

impl TerrainLayout {
    /// Parse map CSV content against a grid of the given dimensions.
    ///
    /// The first line is treated as a header and skipped. Blank lines are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MalformedRow`] when a row is too short for its
    /// kind or its coordinates fail to parse as integers.
    pub fn parse(contents: &str, width: i32, height: i32) -> Result<Self, WorldError> {
        let bounds = WorldGrid::new(width, height);
        let mut features = Vec::new();

        for (index, raw_line) in contents.lines().enumerate().skip(1) {
            let line = index.saturating_add(1);
            let row = raw_line.trim();
            if row.is_empty() {
                continue;
            }

            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            let Some(feature) = parse_row(&fields, line)? else {
                continue;
            };

            let position = feature_position(&feature);
            if !bounds.in_bounds(position) {
                debug!(line, %position, "map row outside grid bounds, dropped");
                continue;
            }
            features.push(feature);
        }

        Ok(Self {
            width,
            height,
            features,
        })
    }

    /// Read and parse a map file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if the file cannot be read (a missing map
    /// is fatal for the whole run), or any error from [`Self::parse`].
    pub fn from_file(path: &Path, width: i32, height: i32) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, width, height)
    }

    /// Number of validated feature rows.
    pub const fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Build a fresh [`Terrain`] with every flower stocked at
    /// `nectar_amount` units.
    pub fn instantiate(&self, nectar_amount: u32) -> Terrain {
        let mut grid = WorldGrid::new(self.width, self.height);
        let mut flowers = Vec::new();
        let mut trees = Vec::new();
        let mut barriers = Vec::new();

        for feature in &self.features {
            match feature {
                Feature::Flower {
                    position,
                    name,
                    color,
                } => {
                    flowers.push(Flower::new(
                        *position,
                        name.clone(),
                        color.clone(),
                        nectar_amount,
                    ));
                    grid.set_cell(*position, TerrainCell::Flower);
                }
                Feature::Tree { position } => {
                    let children = (0..TREE_FLOWER_COUNT)
                        .map(|i| {
                            Flower::new(
                                *position,
                                format!("flower_{i}"),
                                String::from(TREE_FLOWER_COLOR),
                                nectar_amount,
                            )
                        })
                        .collect();
                    trees.push(Tree::new(*position, children));
                    grid.set_cell(*position, TerrainCell::Tree);
                }
                Feature::Barrier { position, kind } => {
                    barriers.push(Barrier {
                        position: *position,
                        kind: *kind,
                    });
                    grid.set_cell(*position, kind.cell());
                }
            }
        }

        Terrain {
            grid,
            flowers,
            trees,
            barriers,
        }
    }
}

/// One run's worth of world state built from a [`TerrainLayout`].
///
/// The grid and barriers stay fixed for the run; flowers and trees deplete
/// as bees collect from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    /// Read-only terrain-class matrix.
    pub grid: WorldGrid,
    /// Free-standing flowers, in map-file order.
    pub flowers: Vec<Flower>,
    /// Trees (each with synthesized child flowers), in map-file order.
    pub trees: Vec<Tree>,
    /// Impassable cells, in map-file order.
    pub barriers: Vec<Barrier>,
}

impl Terrain {
    /// Whether a barrier occupies `pos`.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.barriers.iter().any(|b| b.position == pos)
    }
}

/// Parse one CSV row into a feature, `Ok(None)` for unrecognized kinds.
fn parse_row(fields: &[&str], line: usize) -> Result<Option<Feature>, WorldError> {
    let Some(&kind) = fields.first() else {
        return Ok(None);
    };
    match kind {
        "flower" => {
            let position = parse_position(fields, line)?;
            let name = field(fields, 3, line, "flower name")?;
            let color = field(fields, 4, line, "flower color")?;
            Ok(Some(Feature::Flower {
                position,
                name,
                color,
            }))
        }
        "tree" => {
            let position = parse_position(fields, line)?;
            Ok(Some(Feature::Tree { position }))
        }
        "water" => {
            let position = parse_position(fields, line)?;
            Ok(Some(Feature::Barrier {
                position,
                kind: BarrierKind::Water,
            }))
        }
        "building" => {
            let position = parse_position(fields, line)?;
            Ok(Some(Feature::Barrier {
                position,
                kind: BarrierKind::Building,
            }))
        }
        _ => Ok(None),
    }
}

/// Parse the `x`/`y` columns of a row.
fn parse_position(fields: &[&str], line: usize) -> Result<Position, WorldError> {
    let x = parse_coordinate(fields, 1, line, "x")?;
    let y = parse_coordinate(fields, 2, line, "y")?;
    Ok(Position::new(x, y))
}

/// Parse one integer coordinate column.
fn parse_coordinate(fields: &[&str], index: usize, line: usize, axis: &str) -> Result<i32, WorldError> {
    let raw = fields
        .get(index)
        .ok_or_else(|| WorldError::MalformedRow {
            line,
            reason: format!("missing {axis} coordinate"),
        })?;
    raw.parse().map_err(|_parse| WorldError::MalformedRow {
        line,
        reason: format!("{axis} coordinate {raw:?} is not an integer"),
    })
}

/// Fetch a required string column.
fn field(fields: &[&str], index: usize, line: usize, what: &str) -> Result<String, WorldError> {
    fields
        .get(index)
        .map(|s| String::from(*s))
        .ok_or_else(|| WorldError::MalformedRow {
            line,
            reason: format!("missing {what} column"),
        })
}

/// The grid cell a feature occupies.
const fn feature_position(feature: &Feature) -> Position {
    match feature {
        Feature::Flower { position, .. }
        | Feature::Tree { position }
        | Feature::Barrier { position, .. } => *position,
    }
}
