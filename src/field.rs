// ------------------------------------------------------------------- STRUCT: ScalarField

use crate::prelude::*;

/// One floating-point value per lattice site, stored flat with x running
/// fastest (`i = x + lx * y`). The lattice is periodic in every dimension;
/// all neighbor lookups wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    data: Vec<Float>,
    lx: usize,
    ly: usize,
}

impl ScalarField {
    pub fn zeros(lx: usize, ly: usize) -> Self {
        ScalarField {
            data: vec![0.0; lx * ly],
            lx,
            ly,
        }
    }

    pub fn uniform(value: Float, lx: usize, ly: usize) -> Self {
        ScalarField {
            data: vec![value; lx * ly],
            lx,
            ly,
        }
    }

    pub fn from_vec(data: Vec<Float>, lx: usize, ly: usize) -> FilmResult<Self> {
        if data.len() != lx * ly {
            return Err(FilmError::DimensionMismatch {
                context: "scalar field construction",
                expected: format!("{} sites ({lx}x{ly})", lx * ly),
                found: format!("{} values", data.len()),
            });
        }
        Ok(ScalarField { data, lx, ly })
    }
}

impl ScalarField {
    pub fn get_lx(&self) -> usize {
        self.lx
    }

    pub fn get_ly(&self) -> usize {
        self.ly
    }

    pub fn extents(&self) -> (usize, usize) {
        (self.lx, self.ly)
    }

    pub fn number_of_sites(&self) -> usize {
        self.data.len()
    }

    /// # Examples
    /// ```
    /// # use lbfilm::field::ScalarField;
    /// let field = ScalarField::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
    ///
    /// assert_eq!(field.get(0, 0), 1.0);
    /// assert_eq!(field.get(2, 0), 3.0);
    /// assert_eq!(field.get(0, 1), 4.0);
    /// ```
    pub fn get(&self, x: usize, y: usize) -> Float {
        self.data[x + self.lx * y]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Float) {
        self.data[x + self.lx * y] = value;
    }

    /// Periodic lookup: indices of any sign wrap around the lattice.
    ///
    /// # Examples
    /// ```
    /// # use lbfilm::field::ScalarField;
    /// let field = ScalarField::from_vec(vec![1.0, 2.0, 3.0, 4.0], 4, 1).unwrap();
    ///
    /// assert_eq!(field.periodic(-1, 0), 4.0);
    /// assert_eq!(field.periodic(4, 0), 1.0);
    /// assert_eq!(field.periodic(5, -1), 2.0);
    /// ```
    pub fn periodic(&self, x: i32, y: i32) -> Float {
        let x = x.rem_euclid(self.lx as i32) as usize;
        let y = y.rem_euclid(self.ly as i32) as usize;
        self.data[x + self.lx * y]
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Float> {
        self.data.iter()
    }

    /// New field with every site displaced by `(cx, cy)` lattice links, with
    /// periodic wraparound: `out(x, y) = self(x - cx, y - cy)`. This is the
    /// streaming primitive, a pure index shift.
    pub fn shifted(&self, cx: i32, cy: i32) -> ScalarField {
        let mut data = Vec::with_capacity(self.data.len());
        (0..self.ly).for_each(|y| {
            (0..self.lx).for_each(|x| {
                data.push(self.periodic(x as i32 - cx, y as i32 - cy));
            });
        });
        ScalarField {
            data,
            lx: self.lx,
            ly: self.ly,
        }
    }

    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|value| value.is_finite())
    }

    pub fn sum(&self) -> Float {
        self.data.iter().sum()
    }
}

impl std::ops::Index<usize> for ScalarField {
    type Output = Float;

    fn index(&self, i: usize) -> &Float {
        &self.data[i]
    }
}

// ------------------------------------------------------------------- STRUCT: VectorField

/// Two-component vector field over a 2D lattice, one scalar field per
/// component with identical extents.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    pub x: ScalarField,
    pub y: ScalarField,
}

impl VectorField {
    pub fn new(x: ScalarField, y: ScalarField) -> FilmResult<Self> {
        if x.extents() != y.extents() {
            return Err(FilmError::DimensionMismatch {
                context: "vector field construction",
                expected: format!("{}x{}", x.get_lx(), x.get_ly()),
                found: format!("{}x{}", y.get_lx(), y.get_ly()),
            });
        }
        Ok(VectorField { x, y })
    }

    pub fn zeros(lx: usize, ly: usize) -> Self {
        VectorField {
            x: ScalarField::zeros(lx, ly),
            y: ScalarField::zeros(lx, ly),
        }
    }

    pub fn extents(&self) -> (usize, usize) {
        self.x.extents()
    }

    pub fn all_finite(&self) -> bool {
        self.x.all_finite() && self.y.all_finite()
    }
}
