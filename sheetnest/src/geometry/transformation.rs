use std::borrow::Borrow;
use std::ops::{Add, Mul};

use ordered_float::NotNan;

use crate::geometry::d_transformation::DTransformation;
use crate::geometry::primitives::Point;

//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

#[derive(Clone, Debug, PartialEq)]
///Affine transformation in matrix form.
///Built from rotations and translations it is a proper rigid transformation, [`Transformation::from_scale`] adds uniform scaling.
pub struct Transformation {
    matrix: [[NotNan<f64>; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    /// Rotation in radians around the origin
    pub fn from_rotation(angle: f64) -> Self {
        Self {
            matrix: rot_m(angle),
        }
    }

    /// Rotation in radians around `pivot`
    pub fn from_rotation_around(angle: f64, pivot: Point) -> Self {
        Self::from_translation((-pivot.0, -pivot.1))
            .rotate(angle)
            .translate((pivot.0, pivot.1))
    }

    /// Uniform scaling by `factor` relative to the origin
    pub fn from_scale(factor: f64) -> Self {
        Self {
            matrix: scale_m(factor),
        }
    }

    pub fn from_dt(dt: &DTransformation) -> Self {
        Self {
            matrix: rot_transl_m(dt.rotation().to_radians(), dt.translation()),
        }
    }

    pub fn rotate(mut self, angle: f64) -> Self {
        self.matrix = dot_prod(&rot_m(angle), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    pub fn transform(mut self, other: &Self) -> Self {
        self.matrix = dot_prod(&other.matrix, &self.matrix);
        self
    }

    pub fn matrix(&self) -> &[[NotNan<f64>; 3]; 3] {
        &self.matrix
    }

    /// Applies the transformation to a single coordinate pair
    #[inline(always)]
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let m = &self.matrix;
        let t_x = m[0][0].into_inner() * x + m[0][1].into_inner() * y + m[0][2].into_inner();
        let t_y = m[1][0].into_inner() * x + m[1][1].into_inner() * y + m[1][2].into_inner();
        (t_x, t_y)
    }

    /// Decomposes a rigid transformation into a rotation (in degrees) followed by a translation
    pub fn decompose(&self) -> DTransformation {
        let m = self.matrix();
        let angle = m[1][0].into_inner().atan2(m[0][0].into_inner());
        let (tx, ty) = (m[0][2].into_inner(), m[1][2].into_inner());
        DTransformation::new(angle.to_degrees(), (tx, ty))
    }
}

impl<T> From<T> for Transformation
where
    T: Borrow<DTransformation>,
{
    fn from(dt: T) -> Self {
        Self::from_dt(dt.borrow())
    }
}

const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
const _1: NotNan<f64> = unsafe { NotNan::new_unchecked(1.0) };

const EMPTY_MATRIX: [[NotNan<f64>; 3]; 3] = [[_1, _0, _0], [_0, _1, _0], [_0, _0, _1]];

fn rot_m(angle: f64) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");

    [[cos, -sin, _0], [sin, cos, _0], [_0, _0, _1]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[_1, _0, h], [_0, _1, k], [_0, _0, _1]]
}

fn scale_m(factor: f64) -> [[NotNan<f64>; 3]; 3] {
    let s = NotNan::new(factor).expect("scale factor is NaN");

    [[s, _0, _0], [_0, s, _0], [_0, _0, _1]]
}

//rotation followed by translation
fn rot_transl_m(angle: f64, (tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[cos, -sin, h], [sin, cos, k], [_0, _0, _1]]
}

#[inline(always)]
fn dot_prod<T>(l: &[[T; 3]; 3], r: &[[T; 3]; 3]) -> [[T; 3]; 3]
where
    T: Add<Output = T> + Mul<Output = T> + Copy,
{
    let cell = |i: usize, j: usize| l[i][0] * r[0][j] + l[i][1] * r[1][j] + l[i][2] * r[2][j];
    [
        [cell(0, 0), cell(0, 1), cell(0, 2)],
        [cell(1, 0), cell(1, 1), cell(1, 2)],
        [cell(2, 0), cell(2, 1), cell(2, 2)],
    ]
}
