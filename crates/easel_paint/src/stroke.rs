//! Stroke style - caps, joins and dashes, rebuilt lazily

use smallvec::SmallVec;

use easel_core::{CapStyle, DashStyle, GraphicsDevice, LineJoin, StrokeStyleProperties};

/// Stroke configuration owning its native stroke style
///
/// Native stroke styles are immutable, so any change marks the handle stale
/// and the next [`get`](Self::get) builds a new one.
pub struct StrokeStyle<D: GraphicsDevice> {
    properties: StrokeStyleProperties,
    dashes: SmallVec<[f32; 4]>,
    handle: Option<D::StrokeStyle>,
    stale: bool,
}

macro_rules! property {
    ($get:ident, $set:ident, $ty:ty) => {
        pub fn $get(&self) -> $ty {
            self.properties.$get
        }

        pub fn $set(&mut self, value: $ty) {
            if self.properties.$get != value {
                self.properties.$get = value;
                self.stale = true;
            }
        }
    };
}

impl<D: GraphicsDevice> StrokeStyle<D> {
    pub fn new() -> Self {
        Self {
            properties: StrokeStyleProperties::default(),
            dashes: SmallVec::new(),
            handle: None,
            stale: true,
        }
    }

    property!(start_cap, set_start_cap, CapStyle);
    property!(end_cap, set_end_cap, CapStyle);
    property!(dash_cap, set_dash_cap, CapStyle);
    property!(line_join, set_line_join, LineJoin);
    property!(miter_limit, set_miter_limit, f32);
    property!(dash_style, set_dash_style, DashStyle);
    property!(dash_offset, set_dash_offset, f32);

    pub fn properties(&self) -> &StrokeStyleProperties {
        &self.properties
    }

    pub fn dashes(&self) -> &[f32] {
        &self.dashes
    }

    /// Set the dash pattern; switches the dash style to `Custom`
    pub fn set_dashes(&mut self, dashes: &[f32]) {
        if self.dashes.as_slice() != dashes {
            self.dashes = SmallVec::from_slice(dashes);
            self.stale = true;
        }
        self.set_dash_style(DashStyle::Custom);
    }

    /// Set start, end and dash caps together
    pub fn set_caps(&mut self, cap: CapStyle) {
        self.set_start_cap(cap);
        self.set_end_cap(cap);
        self.set_dash_cap(cap);
    }

    /// Whether the next [`get`](Self::get) rebuilds the native style
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The native stroke style as last built, or `None` while stale
    pub fn current(&self) -> Option<&D::StrokeStyle> {
        if self.stale {
            None
        } else {
            self.handle.as_ref()
        }
    }

    /// The native stroke style, rebuilt if anything changed
    ///
    /// On failure the style stays stale, so the next call retries.
    pub fn get(&mut self, device: &mut D) -> Option<&D::StrokeStyle> {
        if self.stale {
            match device.create_stroke_style(&self.properties, &self.dashes) {
                Ok(handle) => {
                    self.handle = Some(handle);
                    self.stale = false;
                }
                Err(err) => {
                    tracing::error!("StrokeStyle rebuild failed: {}", err);
                    self.handle = None;
                    return None;
                }
            }
        }
        self.handle.as_ref()
    }
}

impl<D: GraphicsDevice> Default for StrokeStyle<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::recording::{RecordingDevice, ResourceKind};

    #[test]
    fn test_set_dashes_forces_custom() {
        let mut style = StrokeStyle::<RecordingDevice>::new();
        style.set_dash_style(DashStyle::Dot);
        style.set_dashes(&[1.0, 2.0, 3.0]);
        assert_eq!(style.dash_style(), DashStyle::Custom);
        assert_eq!(style.dashes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_lazy_rebuild() {
        let mut device = RecordingDevice::new();
        let mut style = StrokeStyle::new();

        assert!(style.get(&mut device).is_some());
        assert!(style.get(&mut device).is_some());
        assert_eq!(device.calls("create_stroke_style"), 1);

        style.set_line_join(LineJoin::Round);
        style.set_line_join(LineJoin::Round);
        assert!(style.is_stale());
        let key = style.get(&mut device).unwrap().0;
        assert_eq!(device.calls("create_stroke_style"), 2);
        assert_eq!(
            device.stroke_style(key).unwrap().properties.line_join,
            LineJoin::Round
        );

        // unchanged value keeps the handle
        style.set_miter_limit(10.0);
        assert!(!style.is_stale());
        assert_eq!(style.current().unwrap().0, key);

        style.set_dash_offset(2.0);
        assert!(style.current().is_none());
    }

    #[test]
    fn test_failure_retries_on_next_read() {
        let mut device = RecordingDevice::new();
        let mut style = StrokeStyle::new();
        style.set_dashes(&[4.0, 2.0]);

        device.fail_next(ResourceKind::StrokeStyle);
        assert!(style.get(&mut device).is_none());
        assert!(style.is_stale());

        let key = style.get(&mut device).unwrap().0;
        assert!(!style.is_stale());
        assert_eq!(device.stroke_style(key).unwrap().dashes.as_slice(), &[4.0, 2.0]);
    }

    #[test]
    fn test_set_caps() {
        let mut style = StrokeStyle::<RecordingDevice>::new();
        style.set_caps(CapStyle::Round);
        assert_eq!(style.start_cap(), CapStyle::Round);
        assert_eq!(style.end_cap(), CapStyle::Round);
        assert_eq!(style.dash_cap(), CapStyle::Round);
    }
}
