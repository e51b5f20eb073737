use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Convert a `ThumbHashError` into a Python `ValueError`.
fn to_py_err(e: thumbhash_core::ThumbHashError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Encode RGBA pixel data into a ThumbHash token.
///
/// Args:
///     width: Image width in pixels.
///     height: Image height in pixels.
///     data: Raw pixel bytes in RGBA order (length must be width * height * 4).
///         Downscale to about 100x100 first.
///
/// Returns:
///     The token as bytes (17 to 25 long).
#[pyfunction]
fn rgba_to_thumb_hash(
    py: Python<'_>,
    width: u32,
    height: u32,
    data: &[u8],
) -> PyResult<Py<PyBytes>> {
    let hash = thumbhash_core::encode(width, height, data).map_err(to_py_err)?;
    Ok(PyBytes::new(py, hash.as_bytes()).into())
}

/// Decode a ThumbHash token into a small RGBA preview.
///
/// Args:
///     hash: The token bytes.
///
/// Returns:
///     A tuple (width, height, rgba) with the preview at most 32x32.
#[pyfunction]
fn thumb_hash_to_rgba(py: Python<'_>, hash: &[u8]) -> PyResult<(u32, u32, Py<PyBytes>)> {
    let preview = thumbhash_core::decode(hash).map_err(to_py_err)?;
    Ok((
        preview.width,
        preview.height,
        PyBytes::new(py, &preview.rgba).into(),
    ))
}

/// Average color of a token.
///
/// Returns:
///     A tuple (r, g, b, a), each in 0.0-1.0.
#[pyfunction]
fn thumb_hash_to_average_rgba(hash: &[u8]) -> PyResult<(f64, f64, f64, f64)> {
    let avg = thumbhash_core::average_rgba(hash).map_err(to_py_err)?;
    Ok((avg.r, avg.g, avg.b, avg.a))
}

/// Approximate width / height ratio of the image a token was made from.
#[pyfunction]
fn thumb_hash_to_approximate_aspect_ratio(hash: &[u8]) -> PyResult<f64> {
    thumbhash_core::approximate_aspect_ratio(hash).map_err(to_py_err)
}

/// Decode a token straight into a `data:image/png;base64,...` URL.
#[pyfunction]
fn thumb_hash_to_data_url(hash: &[u8]) -> PyResult<String> {
    thumbhash_core::to_data_url(hash).map_err(to_py_err)
}

/// Encode arbitrary RGBA pixel data as a PNG `data:` URL.
#[pyfunction]
fn rgba_to_data_url(width: u32, height: u32, data: &[u8]) -> PyResult<String> {
    thumbhash_core::rgba_to_data_url(width, height, data).map_err(to_py_err)
}

/// ThumbHash image placeholders (Rust-powered).
#[pymodule]
fn thumbhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rgba_to_thumb_hash, m)?)?;
    m.add_function(wrap_pyfunction!(thumb_hash_to_rgba, m)?)?;
    m.add_function(wrap_pyfunction!(thumb_hash_to_average_rgba, m)?)?;
    m.add_function(wrap_pyfunction!(thumb_hash_to_approximate_aspect_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(thumb_hash_to_data_url, m)?)?;
    m.add_function(wrap_pyfunction!(rgba_to_data_url, m)?)?;
    Ok(())
}
