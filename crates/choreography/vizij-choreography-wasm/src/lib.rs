use js_sys::{Array, Float32Array, Function, JSON};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vizij_choreography_core::{
    presets, AnimationState, Choreographer, ChoreographyConfig, PoseTable,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(message: &str, err: &JsValue);
}

#[wasm_bindgen]
pub struct VizijChoreography {
    core: Choreographer,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn table_from_js(sheet: JsValue) -> Result<PoseTable, JsError> {
    if jsvalue_is_undefined_or_null(&sheet) {
        return Ok(presets::transformer());
    }
    // Stringify so sheet parsing goes through the core JSON loader
    let s = JSON::stringify(&sheet)
        .map_err(|e| JsError::new(&format!("sheet stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new("sheet: stringify produced non-string"))?;
    PoseTable::from_json(&s).map_err(|e| JsError::new(&format!("sheet error: {e}")))
}

#[wasm_bindgen]
impl VizijChoreography {
    /// Create a choreographer. Both arguments are optional:
    ///   new VizijChoreography()                          // transformer preset, defaults
    ///   new VizijChoreography({ restart_delay_ms: 500 }, sheet)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, sheet: JsValue) -> Result<VizijChoreography, JsError> {
        console_error_panic_hook::set_once();

        let cfg: ChoreographyConfig = if jsvalue_is_undefined_or_null(&config) {
            ChoreographyConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let table = table_from_js(sheet)?;
        let core = Choreographer::new(table, cfg)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(VizijChoreography { core })
    }

    /// Step by dt (seconds) scaled by `speed`. Returns the events raised this tick.
    #[wasm_bindgen]
    pub fn advance(&mut self, dt: f32, speed: f32) -> Result<JsValue, JsError> {
        let out = self.core.advance(dt, speed);
        swb::to_value(&out.events).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Deliver a due restart without stepping animation time.
    #[wasm_bindgen(js_name = poll_timers)]
    pub fn poll_timers(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.poll_timers();
        swb::to_value(&out.events).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Current `[x, y, z]` of a part. Unknown part names are an error here.
    #[wasm_bindgen(js_name = position_of)]
    pub fn position_of(&self, part: &str) -> Result<Float32Array, JsError> {
        if !self.core.table().contains(part) {
            return Err(JsError::new(&format!("unknown part '{part}'")));
        }
        let p = self.core.position_of(part).to_array();
        Ok(Float32Array::from(&p[..]))
    }

    #[wasm_bindgen(js_name = current_state)]
    pub fn current_state(&self) -> String {
        self.core.current_state().name().to_string()
    }

    #[wasm_bindgen(js_name = current_scale)]
    pub fn current_scale(&self) -> f32 {
        self.core.current_scale()
    }

    #[wasm_bindgen(js_name = current_rotation)]
    pub fn current_rotation(&self) -> f32 {
        self.core.current_rotation()
    }

    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.core.progress()
    }

    /// Retarget by state name, e.g. `"ASSEMBLING_TRANSITION"` or `"IDLE"`.
    #[wasm_bindgen]
    pub fn retarget(&mut self, state: &str) -> Result<(), JsError> {
        let requested: AnimationState = state
            .parse()
            .map_err(|e| JsError::new(&format!("retarget error: {e}")))?;
        self.core.retarget(requested);
        Ok(())
    }

    /// Full frame: state, pose, scale, rotation and every part position.
    #[wasm_bindgen]
    pub fn frame(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.frame()).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.snapshot())
            .map_err(|e| JsError::new(&format!("snapshot error: {e}")))
    }

    /// Part names in declaration order.
    #[wasm_bindgen]
    pub fn parts(&self) -> Array {
        self.core
            .table()
            .all_parts()
            .map(JsValue::from_str)
            .collect()
    }

    /// Register `callback(finalState: string)`, called when an
    /// `ASSEMBLING_TRANSITION` pass lands. Pass null/undefined to clear.
    #[wasm_bindgen(js_name = set_on_assembly_complete)]
    pub fn set_on_assembly_complete(&mut self, callback: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&callback) {
            self.core.clear_on_assembly_complete();
            return Ok(());
        }
        let f: Function = callback
            .dyn_into()
            .map_err(|_| JsError::new("set_on_assembly_complete: expected a function"))?;
        self.core.set_on_assembly_complete(move |state: AnimationState| {
            // Exceptions cannot propagate out of `advance`; surface them instead.
            if let Err(err) = f.call1(&JsValue::UNDEFINED, &JsValue::from_str(state.name())) {
                console_error("set_on_assembly_complete callback threw:", &err);
            }
        });
        Ok(())
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    #[wasm_bindgen(js_name = is_disposed)]
    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
