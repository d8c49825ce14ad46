use anyhow::{bail, ensure, Context, Result};

use crate::coords::{GridPos, Vec2};

use super::Ground;

/// Rectangular grid of optional tile heights.
///
/// Planar positions map to the nearest cell; anything off the grid, or on an
/// empty cell, has no ground.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    length: usize,
    cells: Vec<Option<f32>>,
}

impl HeightField {
    /// Empty field: no cell has ground yet. Dimensions are clamped to at least 1.
    pub fn new(width: usize, length: usize) -> Self {
        let width = width.max(1);
        let length = length.max(1);
        Self { width, length, cells: vec![None; width * length] }
    }

    pub fn flat(width: usize, length: usize, height: f32) -> Self {
        let mut field = Self::new(width, length);
        field.cells.fill(Some(height));
        field
    }

    /// Parses whitespace-separated rows of heights; `.` marks a cell without ground.
    /// Row `n` of the text is `y = n`, column `m` is `x = m`. Blank lines are ignored.
    ///
    /// ```text
    /// 0 0 1 .
    /// 0 0 2 3
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<Option<f32>>> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| match tok {
                    "." => Ok(None),
                    _ => tok
                        .parse::<f32>()
                        .map(Some)
                        .with_context(|| format!("line {}: bad height {tok:?}", line_no + 1)),
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        let Some(width) = rows.first().map(Vec::len) else {
            bail!("height field has no rows");
        };
        ensure!(
            rows.iter().all(|r| r.len() == width),
            "height field rows have differing lengths"
        );

        Ok(Self {
            width,
            length: rows.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// `None` off the grid or on an empty cell.
    pub fn get(&self, cell: GridPos) -> Option<f32> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Sets or clears a cell. Returns `false` for cells off the grid.
    pub fn set(&mut self, cell: GridPos, height: Option<f32>) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = height;
                true
            }
            None => false,
        }
    }

    /// Every cell that has ground, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (GridPos, f32)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, h)| {
            h.map(|h| (GridPos::new((i % self.width) as i32, (i / self.width) as i32), h))
        })
    }

    fn index(&self, cell: GridPos) -> Option<usize> {
        let x = usize::try_from(cell.x).ok()?;
        let y = usize::try_from(cell.y).ok()?;
        (x < self.width && y < self.length).then(|| y * self.width + x)
    }
}

impl Ground for HeightField {
    fn height_at(&self, x: f32, y: f32) -> Option<f32> {
        self.get(GridPos::from_planar(Vec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_rows_as_y() {
        let field = HeightField::parse("0 1 .\n2 3 4\n").unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.length(), 2);
        assert_eq!(field.get(GridPos::new(1, 0)), Some(1.0));
        assert_eq!(field.get(GridPos::new(2, 0)), None);
        assert_eq!(field.get(GridPos::new(0, 1)), Some(2.0));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert!(HeightField::parse("0 0\n0\n").is_err());
        assert!(HeightField::parse("  \n").is_err());
        assert!(HeightField::parse("0 x").is_err());
    }

    #[test]
    fn out_of_range_has_no_ground() {
        let field = HeightField::flat(2, 2, 1.0);
        assert_eq!(field.height_at(-1.0, 0.0), None);
        assert_eq!(field.height_at(0.0, 2.0), None);
        assert_eq!(field.height_at(1.4, 0.6), Some(1.0));
    }

    #[test]
    fn set_outside_grid_is_refused() {
        let mut field = HeightField::new(2, 2);
        assert!(!field.set(GridPos::new(5, 0), Some(1.0)));
        assert!(field.set(GridPos::new(1, 1), Some(2.5)));
        assert_eq!(field.tiles().collect::<Vec<_>>(), vec![(GridPos::new(1, 1), 2.5)]);
    }
}
