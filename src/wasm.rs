use wasm_bindgen::prelude::*;
use serde_wasm_bindgen::{from_value, to_value};

use crate::market::{MarketBuckets, MarketTab, default_selection};
use crate::types::RawAsset;

/// Initialize hooks for better debugging in WASM
#[wasm_bindgen]
pub fn init_hooks() {
    console_error_panic_hook::set_once();
}

/// Partition an asset list into the four market buckets.
///
/// # Arguments
/// - `assets_json`: Array of raw asset objects as held in the account settings
#[wasm_bindgen]
pub fn partition_assets(assets_json: JsValue) -> Result<JsValue, JsError> {
    let assets: Vec<RawAsset> = from_value(assets_json)
        .map_err(|e| JsError::new(&format!("Invalid Assets JSON: {}", e)))?;

    let buckets = MarketBuckets::from_raw(&assets);

    to_value(&buckets)
        .map_err(|e| JsError::new(&format!("Serialization Error: {}", e)))
}

/// Default asset for a market tab (`"supply"` or `"borrow"`), or `undefined`.
#[wasm_bindgen(js_name = defaultSelection)]
pub fn default_selection_wasm(tab: &str, assets_json: JsValue) -> Result<JsValue, JsError> {
    let tab: MarketTab = tab
        .parse()
        .map_err(|_| JsError::new(&format!("Unknown market tab: {}", tab)))?;
    let assets: Vec<RawAsset> = from_value(assets_json)
        .map_err(|e| JsError::new(&format!("Invalid Assets JSON: {}", e)))?;

    let buckets = MarketBuckets::from_raw(&assets);
    match default_selection(tab, &buckets) {
        Some(asset) => to_value(asset)
            .map_err(|e| JsError::new(&format!("Serialization Error: {}", e))),
        None => Ok(JsValue::UNDEFINED),
    }
}
