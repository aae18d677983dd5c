use crate::rle;
use crate::rle::RleError;

/// A small pattern used to seed the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: String,
    pub width: usize,
    pub height: usize,

    /// Row-major bitmap, `width * height` long
    cells: Vec<bool>,
}

impl Shape {
    pub fn new(name: &str, width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), width * height, "bitmap does not match the size");

        Self {
            name: name.to_string(),
            width,
            height,
            cells,
        }
    }

    /// Decode a shape from RLE. `#N` comment lines take precedence over `name`.
    pub fn from_rle(name: &str, bytes: &[u8]) -> Result<Self, RleError> {
        let rle = rle::decode(bytes)?;

        let name = match rle.name {
            Some(n) => String::from_utf8_lossy(n).into_owned(),
            None => name.to_string(),
        };

        let mut cells = vec![false; rle.width * rle.height];
        for (x, y) in rle.cells {
            cells[y * rle.width + x] = true;
        }

        Ok(Self {
            name,
            width: rle.width,
            height: rle.height,
            cells,
        })
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

pub const GOSPER_GLIDER_GUN: &str = "\
#N Gosper glider gun
x = 36, y = 9, rule = B3/S23
24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4b
obo$10bo5bo7bo$11bo3bo$12b2o!";

pub const LWSS: &str = "\
#N Lightweight spaceship
x = 5, y = 4, rule = B3/S23
bo2bo$o4b$o3bo$4o!";

pub const HWSS: &str = "\
#N Heavyweight spaceship
x = 7, y = 5, rule = B3/S23
3b2o2b$bo4bo$o6b$o5bo$6o!";

pub const COPPERHEAD: &str = "\
#N Copperhead
x = 8, y = 12, rule = B3/S23
b2o2b2o$3b2o$3b2o$obo2bobo$o6bo2$o6bo$b2o2b2o$2b4o2$3b2o$3b2o!";

pub const WEEKENDER: &str = "\
#N Weekender
x = 16, y = 11, rule = B3/S23
bo12bob$bo12bob$obo10bobo$bo12bob$bo12bob$2bo3b4o3bo2b$6b4o6b$2b4o4b4o
2b2$4bo6bo4b$5b2o2b2o!";

/// Spaceships scattered by the ships pattern
pub const SHIPS: [&str; 4] = [LWSS, HWSS, COPPERHEAD, WEEKENDER];

pub fn gosper_glider_gun() -> Result<Shape, RleError> {
    Shape::from_rle("gun", GOSPER_GLIDER_GUN.as_bytes())
}

pub fn ships() -> Result<Vec<Shape>, RleError> {
    SHIPS
        .iter()
        .map(|rle| Shape::from_rle("ship", rle.as_bytes()))
        .collect()
}
