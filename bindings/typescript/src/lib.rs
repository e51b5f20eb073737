use napi::bindgen_prelude::*;
use napi::Task;
use napi_derive::napi;

fn to_js_err(e: thumbhash_core::ThumbHashError) -> Error {
    Error::from_reason(e.to_string())
}

/// Encode RGBA pixel data into a ThumbHash token.
///
/// @param width - Image width in pixels.
/// @param height - Image height in pixels.
/// @param data - Raw pixel bytes in RGBA order (length must be width * height * 4).
/// @returns The token bytes (17 to 25 long).
#[napi]
pub fn rgba_to_thumb_hash(width: u32, height: u32, data: Uint8Array) -> Result<Uint8Array> {
    let hash = thumbhash_core::encode(width, height, data.as_ref()).map_err(to_js_err)?;
    Ok(Uint8Array::from(hash.into_bytes()))
}

/// A decoded preview raster.
#[napi(object)]
pub struct ThumbHashImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Uint8Array,
}

/// Decode a ThumbHash token into a small RGBA preview (at most 32x32).
///
/// @param hash - The token bytes.
/// @returns An object with width, height and rgba fields.
#[napi]
pub fn thumb_hash_to_rgba(hash: Uint8Array) -> Result<ThumbHashImage> {
    let preview = thumbhash_core::decode(hash.as_ref()).map_err(to_js_err)?;
    Ok(ThumbHashImage {
        width: preview.width,
        height: preview.height,
        rgba: Uint8Array::from(preview.rgba),
    })
}

/// Average color of a token, each channel in 0.0-1.0.
#[napi(object)]
pub struct AverageRgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[napi]
pub fn thumb_hash_to_average_rgba(hash: Uint8Array) -> Result<AverageRgba> {
    let avg = thumbhash_core::average_rgba(hash.as_ref()).map_err(to_js_err)?;
    Ok(AverageRgba {
        r: avg.r,
        g: avg.g,
        b: avg.b,
        a: avg.a,
    })
}

/// Approximate width / height ratio of the image a token was made from.
#[napi]
pub fn thumb_hash_to_approximate_aspect_ratio(hash: Uint8Array) -> Result<f64> {
    thumbhash_core::approximate_aspect_ratio(hash.as_ref()).map_err(to_js_err)
}

/// Decode a token straight into a `data:image/png;base64,...` URL.
#[napi]
pub fn thumb_hash_to_data_url(hash: Uint8Array) -> Result<String> {
    thumbhash_core::to_data_url(hash.as_ref()).map_err(to_js_err)
}

/// Encode arbitrary RGBA pixel data as a PNG `data:` URL.
#[napi]
pub fn rgba_to_data_url(width: u32, height: u32, data: Uint8Array) -> Result<String> {
    thumbhash_core::rgba_to_data_url(width, height, data.as_ref()).map_err(to_js_err)
}

/// Base64 text form of a token, after validating it.
#[napi]
pub fn thumb_hash_to_base64(hash: Uint8Array) -> Result<String> {
    let hash = thumbhash_core::ThumbHash::from_bytes(hash.to_vec()).map_err(to_js_err)?;
    Ok(hash.to_base64())
}

/// Parse the base64 text form of a token.
#[napi]
pub fn thumb_hash_from_base64(text: String) -> Result<Uint8Array> {
    let hash = thumbhash_core::ThumbHash::from_base64(&text).map_err(to_js_err)?;
    Ok(Uint8Array::from(hash.into_bytes()))
}

// --- Async versions (run on libuv thread pool) ---

pub struct EncodeTask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Task for EncodeTask {
    type Output = Vec<u8>;
    type JsValue = Uint8Array;

    fn compute(&mut self) -> Result<Self::Output> {
        thumbhash_core::encode(self.width, self.height, &self.data)
            .map(|hash| hash.into_bytes())
            .map_err(to_js_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(Uint8Array::from(output))
    }
}

/// Async version of rgbaToThumbHash that runs on the libuv thread pool.
/// Returns a Promise<Uint8Array>.
#[napi]
pub fn rgba_to_thumb_hash_async(
    width: u32,
    height: u32,
    data: Uint8Array,
) -> AsyncTask<EncodeTask> {
    AsyncTask::new(EncodeTask {
        data: data.to_vec(),
        width,
        height,
    })
}

pub struct DataUrlTask {
    hash: Vec<u8>,
}

impl Task for DataUrlTask {
    type Output = String;
    type JsValue = String;

    fn compute(&mut self) -> Result<Self::Output> {
        thumbhash_core::to_data_url(&self.hash).map_err(to_js_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(output)
    }
}

/// Async version of thumbHashToDataUrl that runs on the libuv thread pool.
/// Returns a Promise<string>.
#[napi]
pub fn thumb_hash_to_data_url_async(hash: Uint8Array) -> AsyncTask<DataUrlTask> {
    AsyncTask::new(DataUrlTask {
        hash: hash.to_vec(),
    })
}
