use crate::config::PlayArea;

/// Axis-aligned bounding box in simulation pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centred on (center_x, center_y)
    pub fn from_center(center_x: i32, center_y: i32, width: i32, height: i32) -> Self {
        Self::new(center_x - width / 2, center_y - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Behaviour shared by everything that moves through the play area
pub trait Entity {
    fn bounds(&self) -> Bounds;

    fn is_alive(&self) -> bool;

    /// Move one tick and deactivate if the entity left the play area
    fn advance(&mut self, area: &PlayArea);
}
