//! Browser backends: LocalStorage and 2D canvas drawing

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::persistence::{Storage, StorageError};
use crate::renderer::Vertex;
use crate::renderer::vertex::as_floats;

fn js_reason(e: wasm_bindgen::JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// `window.localStorage`
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_reason(e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_reason(e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Throws QuotaExceededError when full
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }
}

/// Stand-in when LocalStorage is blocked (private mode, sandboxed iframe)
pub enum BrowserStorage {
    Local(LocalStorage),
    Memory(crate::persistence::MemoryStorage),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Ok(local) => Self::Local(local),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                Self::Memory(Default::default())
            }
        }
    }
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Local(s) => s.get_item(key),
            Self::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(s) => s.set_item(key, value),
            Self::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(s) => s.remove_item(key),
            Self::Memory(s) => s.remove_item(key),
        }
    }
}

fn css_color(c: [f32; 4]) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({},{},{},{})", byte(c[0]), byte(c[1]), byte(c[2]), c[3])
}

/// Draws triangle lists onto a 2D canvas in playfield coordinates
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    scale: (f64, f64),
}

impl CanvasRenderer {
    pub fn new(
        canvas: &HtmlCanvasElement,
        field_width: f32,
        field_height: f32,
    ) -> Result<Self, wasm_bindgen::JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let scale = (
            canvas.width() as f64 / field_width as f64,
            canvas.height() as f64 / field_height as f64,
        );
        Ok(Self { ctx, scale })
    }

    /// Clear to `background`, then fill every triangle. Runs of the same
    /// color share one path.
    pub fn draw(&self, vertices: &[Vertex], background: [f32; 4]) {
        let ctx = &self.ctx;
        ctx.set_transform(self.scale.0, 0.0, 0.0, self.scale.1, 0.0, 0.0)
            .ok();

        ctx.set_fill_style_str(&css_color(background));
        ctx.fill_rect(0.0, 0.0, 1.0e4, 1.0e4);

        // Walk the flat buffer: six floats per vertex, three vertices per triangle
        let stride = Vertex::FLOATS;
        let mut current: Option<[f32; 4]> = None;
        for tri in as_floats(vertices).chunks_exact(stride * 3) {
            let color = [tri[2], tri[3], tri[4], tri[5]];
            if current != Some(color) {
                if current.is_some() {
                    ctx.fill();
                }
                ctx.begin_path();
                ctx.set_fill_style_str(&css_color(color));
                current = Some(color);
            }
            ctx.move_to(tri[0] as f64, tri[1] as f64);
            ctx.line_to(tri[stride] as f64, tri[stride + 1] as f64);
            ctx.line_to(tri[2 * stride] as f64, tri[2 * stride + 1] as f64);
            ctx.close_path();
        }
        if current.is_some() {
            ctx.fill();
        }
    }
}
