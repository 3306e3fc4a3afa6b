#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), klotski::layout::LayoutError> {
    klotski::run()
}

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), wasm_bindgen::JsValue> {
    web_sys::console::log_1(&"Starting klotski".into());
    klotski::run().map_err(|err| wasm_bindgen::JsValue::from_str(&err.to_string()))
}
