use crate::error::{Result, SimError};
use crate::world::grid::Grid;
use crate::world::tile::{Position, TerrainKind};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

/// Parse a terrain map from a file path
pub fn parse_terrain(path: &str) -> Result<Grid> {
    let file = File::open(path)?;
    parse_terrain_from_reader(BufReader::with_capacity(64 * 1024, file))
}

/// Parse a terrain map directly from an in-memory string
pub fn parse_terrain_from_str(src: &str) -> Result<Grid> {
    parse_terrain_from_reader(src.as_bytes())
}

/// One row per line, `.` for dirt and `~` for water. Blank lines are skipped;
/// every row must have the same width.
pub fn parse_terrain_from_reader<R: BufRead>(reader: R) -> Result<Grid> {
    let mut rows: Vec<Vec<TerrainKind>> = Vec::with_capacity(128);

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .chars()
            .map(|c| TerrainKind::from_glyph(c).ok_or(SimError::InvalidTile(c)))
            .collect::<Result<Vec<_>>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(SimError::InvalidLine(format!(
                    "line {}: expected {} tiles, found {}",
                    lineno + 1,
                    first.len(),
                    row.len()
                )));
            }
        }
        rows.push(row);
    }

    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(SimError::InvalidLine("map has no rows".to_string()));
    }

    let mut grid = Grid::new(width, rows.len())?;
    for (y, row) in rows.iter().enumerate() {
        for (x, &terrain) in row.iter().enumerate() {
            grid.set_terrain(Position::new(x, y), terrain);
        }
    }
    Ok(grid)
}

/// Render terrain back into the map format
pub fn terrain_to_string(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        out.extend(row.iter().map(|t| t.terrain.glyph()));
        out.push('\n');
    }
    out
}

/// Write the terrain map to a file
pub fn write_terrain(path: &str, grid: &Grid) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(terrain_to_string(grid).as_bytes())?;
    Ok(())
}
