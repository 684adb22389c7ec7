use fretboard_detector::image::Frame;

/// Procedural fretboard photo: a dark board carrying horizontal strings and
/// vertical frets, a bright bridge block past the last fret, all rotated
/// counter-clockwise on screen by `theta_deg` about the frame centre.
#[derive(Clone, Debug)]
pub struct FretboardScene {
    pub width: usize,
    pub height: usize,
    pub theta_deg: f64,
    pub top: i64,
    pub string_count: i64,
    pub string_spacing: i64,
    pub string_thickness: i64,
    pub left: i64,
    pub fret_count: i64,
    pub fret_spacing: i64,
    pub bridge_width: i64,
    pub board_margin: i64,
    pub background: u8,
    pub board: u8,
    pub line: u8,
    pub bridge: u8,
}

impl Default for FretboardScene {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            theta_deg: 0.0,
            top: 150,
            string_count: 6,
            string_spacing: 20,
            string_thickness: 2,
            left: 100,
            fret_count: 16,
            fret_spacing: 40,
            bridge_width: 40,
            board_margin: 3,
            background: 0,
            board: 90,
            line: 200,
            bridge: 240,
        }
    }
}

impl FretboardScene {
    pub fn bottom(&self) -> i64 {
        self.top + self.string_spacing * (self.string_count - 1) + self.string_thickness - 1
    }

    pub fn right(&self) -> i64 {
        self.left + self.fret_spacing * (self.fret_count - 1)
    }

    /// Unrotated grid extent `(top, bottom, left, right)`.
    pub fn extent(&self) -> (i64, i64, i64, i64) {
        (self.top, self.bottom(), self.left, self.right())
    }

    fn is_string_row(&self, y: i64) -> bool {
        (0..self.string_count).any(|k| {
            let start = self.top + self.string_spacing * k;
            (start..start + self.string_thickness).contains(&y)
        })
    }

    fn is_fret_col(&self, x: i64) -> bool {
        x >= self.left
            && x <= self.right()
            && (x - self.left) % self.fret_spacing == 0
    }

    /// Value of the unrotated pattern at `(x, y)`.
    fn pattern(&self, x: i64, y: i64) -> u8 {
        let (top, bottom, left, right) = self.extent();
        let m = self.board_margin;
        if y < top - m || y > bottom + m {
            return self.background;
        }
        if x > right && x <= right + self.bridge_width {
            self.bridge
        } else if self.is_fret_col(x) {
            self.line
        } else if self.is_string_row(y) && x >= left && x <= right {
            self.line
        } else if x >= left - m && x <= right {
            self.board
        } else {
            self.background
        }
    }

    pub fn render(&self) -> Frame {
        let (w, h) = (self.width, self.height);
        let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
        let (sin, cos) = self.theta_deg.to_radians().sin_cos();
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                let (dx, dy) = (x as f64 - cx, y as f64 - cy);
                let sx = (cx + dx * cos - dy * sin + 0.5).floor() as i64;
                let sy = (cy + dx * sin + dy * cos + 0.5).floor() as i64;
                let v = self.pattern(sx, sy);
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::from_raw(w, h, data).expect("scene dimensions are non-zero")
    }
}
