use crate::Point;

/// Axis-aligned rectangle in pixel coordinates.
///
/// Covers the half-open range `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl BoundingBox {
    /// Smallest box enclosing the polygon. Coordinates are truncated toward
    /// zero. Returns `None` for polygons with fewer than three points.
    pub fn from_polygon(polygon: &[Point]) -> Option<Self> {
        if polygon.len() < 3 {
            return None;
        }

        let xs = polygon.iter().map(|p| p.x as i64);
        let ys = polygon.iter().map(|p| p.y as i64);

        Some(Self {
            x1: xs.clone().min()?,
            x2: xs.max()?,
            y1: ys.clone().min()?,
            y2: ys.max()?,
        })
    }

    /// Clamps every edge into `[0, width - 1] x [0, height - 1]`.
    pub fn clamp(self, width: u32, height: u32) -> Self {
        let max_x = (width as i64 - 1).max(0);
        let max_y = (height as i64 - 1).max(0);

        Self {
            x1: self.x1.clamp(0, max_x),
            x2: self.x2.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
            y2: self.y2.clamp(0, max_y),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.x2 > self.x1 && self.y2 > self.y1
    }

    /// Polygon -> box -> clamp -> validity check, in one step.
    pub fn from_polygon_clamped(polygon: &[Point], width: u32, height: u32) -> Option<Self> {
        Self::from_polygon(polygon)
            .map(|b| b.clamp(width, height))
            .filter(BoundingBox::is_valid)
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<Point> {
        vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]
    }

    #[test]
    fn box_from_polygon_uses_extremes() {
        let poly = vec![
            Point::new(12.9, 5.0),
            Point::new(40.0, 8.2),
            Point::new(38.5, 30.7),
            Point::new(10.1, 27.0),
        ];
        let b = BoundingBox::from_polygon(&poly).unwrap();
        assert_eq!(
            b,
            BoundingBox {
                x1: 10,
                y1: 5,
                x2: 40,
                y2: 30
            }
        );
    }

    #[test]
    fn too_few_points_yield_nothing() {
        assert!(BoundingBox::from_polygon(&[]).is_none());
        assert!(BoundingBox::from_polygon(&[Point::new(1.0, 1.0), Point::new(5.0, 5.0)]).is_none());
    }

    #[test]
    fn clamp_keeps_box_inside_image() {
        let b = BoundingBox::from_polygon(&rect(-20.0, -5.0, 150.0, 80.0))
            .unwrap()
            .clamp(100, 50);
        assert_eq!(
            b,
            BoundingBox {
                x1: 0,
                y1: 0,
                x2: 99,
                y2: 49
            }
        );
        assert!(b.is_valid());
    }

    #[test]
    fn polygon_outside_image_is_degenerate() {
        assert!(BoundingBox::from_polygon_clamped(&rect(200.0, 10.0, 300.0, 30.0), 100, 50).is_none());
        assert!(BoundingBox::from_polygon_clamped(&rect(-50.0, -40.0, -10.0, -2.0), 100, 50).is_none());
    }

    #[test]
    fn zero_area_polygon_is_dropped() {
        assert!(BoundingBox::from_polygon_clamped(&rect(10.0, 10.0, 10.0, 30.0), 100, 50).is_none());
    }

    #[test]
    fn contains_is_half_open() {
        let b = BoundingBox {
            x1: 10,
            y1: 10,
            x2: 60,
            y2: 30,
        };
        assert!(b.contains(10, 10));
        assert!(b.contains(59, 29));
        assert!(!b.contains(60, 29));
        assert!(!b.contains(59, 30));
        assert_eq!((b.width(), b.height()), (50, 20));
    }
}
