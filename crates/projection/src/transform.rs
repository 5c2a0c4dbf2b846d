//! Transforms between projections.
//!
//! Every transform goes source projection → lon/lat on the source datum →
//! datum shift → target projection. Geographic coordinates are `(lon, lat)`
//! in degrees, projected coordinates are meters.

use ndarray::{Array2, Zip};
use wrf_common::{Datum, ProjectionDescriptor};

use crate::error::{ProjectionError, ProjectionResult};
use crate::geographic::{normalize_lon, shift_datum};
use crate::lambert::LambertConformal;

/// A projection ready to transform coordinates.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Spherical Lambert Conformal Conic and the datum of its sphere
    Lambert(LambertConformal, Datum),
    /// Plain lon/lat on a datum
    Geographic(Datum),
}

impl Projection {
    /// Build the projection a descriptor names.
    pub fn from_descriptor(descriptor: &ProjectionDescriptor) -> ProjectionResult<Self> {
        match descriptor {
            ProjectionDescriptor::LambertConformal(params) => Ok(Projection::Lambert(
                LambertConformal::from_params(params)?,
                descriptor.datum(),
            )),
            ProjectionDescriptor::Geographic(datum) => Ok(Projection::Geographic(*datum)),
        }
    }

    /// Datum the projection's geographic coordinates refer to.
    pub fn datum(&self) -> &Datum {
        match self {
            Projection::Lambert(_, datum) | Projection::Geographic(datum) => datum,
        }
    }

    /// Projection coordinates to lon/lat on this projection's datum.
    fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Lambert(lcc, _) => lcc.inverse(x, y),
            Projection::Geographic(_) => (normalize_lon(x), y),
        }
    }

    /// Lon/lat on this projection's datum to projection coordinates.
    fn from_geographic(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::Lambert(lcc, _) => lcc.forward(lon, lat),
            Projection::Geographic(_) => (lon, lat),
        }
    }
}

/// Transform a single point from one projection to another.
pub fn transform_point(from: &Projection, to: &Projection, x: f64, y: f64) -> (f64, f64) {
    let (lon, lat) = from.to_geographic(x, y);
    let (lon, lat) = shift_datum(lon, lat, from.datum(), to.datum());
    to.from_geographic(lon, lat)
}

/// Transform two coordinate arrays elementwise.
///
/// `x` and `y` must have the same shape; the outputs share it. Points are
/// transformed in parallel on the rayon pool.
pub fn transform_grid(
    from: &Projection,
    to: &Projection,
    x: &Array2<f64>,
    y: &Array2<f64>,
) -> ProjectionResult<(Array2<f64>, Array2<f64>)> {
    if x.dim() != y.dim() {
        return Err(ProjectionError::ShapeMismatch {
            x: x.dim(),
            y: y.dim(),
        });
    }

    let mut x_out = Array2::<f64>::zeros(x.dim());
    let mut y_out = Array2::<f64>::zeros(y.dim());

    Zip::from(&mut x_out)
        .and(&mut y_out)
        .and(x)
        .and(y)
        .par_for_each(|xo, yo, &xi, &yi| {
            let (xt, yt) = transform_point(from, to, xi, yi);
            *xo = xt;
            *yo = yt;
        });

    Ok((x_out, y_out))
}
