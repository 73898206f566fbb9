use hitmap::HitMapError;
use pyo3::prelude::*;

/// Map core errors onto Python exceptions.
///
/// Contract violations by the caller become `ValueError`.
pub(crate) fn to_py_err(err: HitMapError) -> PyErr {
    match err {
        HitMapError::InvalidInput(msg) | HitMapError::InvalidConfiguration(msg) => {
            pyo3::exceptions::PyValueError::new_err(msg)
        }
    }
}

pub(crate) fn scheme_from_nest(nest: bool) -> hitmap::Scheme {
    if nest {
        hitmap::Scheme::Nested
    } else {
        hitmap::Scheme::Ring
    }
}
