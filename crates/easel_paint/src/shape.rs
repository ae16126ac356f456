//! Shape - begin/vertex/end path building
//!
//! ```text
//!  Idle ──begin()──▶ Building ──vertex/curve──▶ FigureOpen
//!   ▲                   │                           │
//!   └──────end()────────┴───────────end()───────────┘
//! ```
//!
//! The first geometry call after `begin` opens the figure at its point; every
//! later call appends a segment. `end` closes the figure and finalizes the
//! native path, which then stays renderable until the next `begin`.

use easel_core::{
    ArcSegment, ArcSize, BezierSegment, FigureBegin, FigureEnd, FillMode, GraphicsDevice,
    GraphicsError, PathSegment, Point, QuadraticBezierSegment, Result, ShapeError,
    SweepDirection, Vec2,
};

enum BuildState<S> {
    Idle,
    Building { sink: S, figure_open: bool },
}

/// Geometry builder owned by a render style
pub struct Shape<D: GraphicsDevice> {
    fill_mode: FillMode,
    segment_flag: PathSegment,
    geometry: Option<D::PathGeometry>,
    state: BuildState<D::GeometrySink>,
    renderable: bool,
}

impl<D: GraphicsDevice> Shape<D> {
    pub fn new() -> Self {
        Self {
            fill_mode: FillMode::default(),
            segment_flag: PathSegment::default(),
            geometry: None,
            state: BuildState::Idle,
            renderable: false,
        }
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    /// Only allowed while idle
    pub fn set_fill_mode(&mut self, mode: FillMode) -> Result<()> {
        if self.is_building() {
            tracing::warn!("Shape::set_fill_mode ignored while building");
            return Err(ShapeError::BuildingLocked.into());
        }
        self.fill_mode = mode;
        Ok(())
    }

    pub fn segment_flag(&self) -> PathSegment {
        self.segment_flag
    }

    /// Only allowed while idle
    pub fn set_segment_flag(&mut self, flag: PathSegment) -> Result<()> {
        if self.is_building() {
            tracing::warn!("Shape::set_segment_flag ignored while building");
            return Err(ShapeError::BuildingLocked.into());
        }
        self.segment_flag = flag;
        Ok(())
    }

    pub fn is_building(&self) -> bool {
        matches!(self.state, BuildState::Building { .. })
    }

    /// True only after a successful [`end`](Self::end)
    pub fn is_renderable(&self) -> bool {
        self.renderable && self.geometry.is_some()
    }

    /// The finalized geometry, if any
    pub fn geometry(&self) -> Option<&D::PathGeometry> {
        if self.renderable {
            self.geometry.as_ref()
        } else {
            None
        }
    }

    /// Start a new path, discarding the previous geometry
    ///
    /// Calling this while already building abandons the build in progress.
    /// If the native path or sink cannot be allocated, the previous geometry
    /// is kept.
    pub fn begin(&mut self, device: &mut D) -> Result<()> {
        if self.is_building() {
            tracing::warn!("Shape::begin called while already building; build abandoned");
            self.abandon();
            return Err(ShapeError::AlreadyBuilding.into());
        }

        let mut geometry = device.create_path_geometry().map_err(|err| {
            tracing::error!("Shape::begin: {}", err);
            err
        })?;
        let mut sink = device.open_geometry(&mut geometry).map_err(|err| {
            tracing::error!("Shape::begin: {}", err);
            err
        })?;

        device.set_fill_mode(&mut sink, self.fill_mode);
        device.set_segment_flags(&mut sink, self.segment_flag);

        self.renderable = false;
        self.geometry = Some(geometry);
        self.state = BuildState::Building {
            sink,
            figure_open: false,
        };
        Ok(())
    }

    /// Line to `point`, or open the figure there
    pub fn vertex(&mut self, device: &mut D, point: Point) -> Result<()> {
        self.append(device, point, |device, sink| device.add_line(sink, point))
    }

    /// Cubic Bezier to `end`, or open the figure at `end`
    pub fn bezier(
        &mut self,
        device: &mut D,
        control1: Point,
        control2: Point,
        end: Point,
    ) -> Result<()> {
        self.append(device, end, |device, sink| {
            device.add_bezier(
                sink,
                BezierSegment {
                    control1,
                    control2,
                    end,
                },
            )
        })
    }

    /// Quadratic Bezier to `end`, or open the figure at `end`
    pub fn quadratic_bezier(&mut self, device: &mut D, control: Point, end: Point) -> Result<()> {
        self.append(device, end, |device, sink| {
            device.add_quadratic_bezier(sink, QuadraticBezierSegment { control, end })
        })
    }

    /// Elliptical arc to `end`, or open the figure at `end`
    pub fn arc(
        &mut self,
        device: &mut D,
        end: Point,
        radius: Vec2,
        rotation: f32,
        sweep: SweepDirection,
        arc_size: ArcSize,
    ) -> Result<()> {
        self.append(device, end, |device, sink| {
            device.add_arc(
                sink,
                ArcSegment {
                    end,
                    radius,
                    rotation,
                    sweep,
                    arc_size,
                },
            )
        })
    }

    /// Close the figure and finalize the path
    ///
    /// With no figure opened there is nothing to finalize: the build is
    /// dropped and the shape stays not renderable.
    pub fn end(&mut self, device: &mut D, style: FigureEnd) -> Result<()> {
        let (mut sink, figure_open) = match std::mem::replace(&mut self.state, BuildState::Idle) {
            BuildState::Idle => {
                tracing::warn!("Shape::end called without begin");
                return Err(ShapeError::NotBuilding.into());
            }
            BuildState::Building { sink, figure_open } => (sink, figure_open),
        };

        if !figure_open {
            tracing::debug!("Shape::end with no figure; nothing to finalize");
            self.geometry = None;
            return Ok(());
        }

        device.end_figure(&mut sink, style);
        if let Err(err) = device.close_sink(sink) {
            tracing::error!("Shape::end: {}", err);
            self.geometry = None;
            return Err(err);
        }
        self.renderable = true;
        Ok(())
    }

    /// Build a single closed or open polygon without touching the builder
    pub fn polygon(
        device: &mut D,
        points: &[Point],
        end: FigureEnd,
        fill_mode: FillMode,
    ) -> Result<D::PathGeometry> {
        let Some((first, rest)) = points.split_first() else {
            return Err(GraphicsError::creation("polygon", "no points"));
        };

        let mut geometry = device.create_path_geometry()?;
        let mut sink = device.open_geometry(&mut geometry)?;
        device.set_fill_mode(&mut sink, fill_mode);
        device.begin_figure(&mut sink, *first, FigureBegin::Filled);
        for point in rest {
            device.add_line(&mut sink, *point);
        }
        device.end_figure(&mut sink, end);
        device.close_sink(sink)?;
        Ok(geometry)
    }

    fn append<F>(&mut self, device: &mut D, start: Point, segment: F) -> Result<()>
    where
        F: FnOnce(&mut D, &mut D::GeometrySink),
    {
        let BuildState::Building { sink, figure_open } = &mut self.state else {
            tracing::warn!("Shape: geometry call outside begin/end ignored");
            return Err(ShapeError::NotBuilding.into());
        };

        if *figure_open {
            segment(device, sink);
        } else {
            device.begin_figure(sink, start, FigureBegin::Filled);
            *figure_open = true;
        }
        Ok(())
    }

    fn abandon(&mut self) {
        self.state = BuildState::Idle;
        self.geometry = None;
        self.renderable = false;
    }
}

impl<D: GraphicsDevice> Default for Shape<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::recording::{RecordedSegment, RecordingDevice, ResourceKind};

    fn triangle(shape: &mut Shape<RecordingDevice>, device: &mut RecordingDevice) {
        shape.begin(device).unwrap();
        shape.vertex(device, Point::new(0.0, 0.0)).unwrap();
        shape.vertex(device, Point::new(10.0, 0.0)).unwrap();
        shape.vertex(device, Point::new(10.0, 10.0)).unwrap();
    }

    #[test]
    fn test_vertex_before_begin_is_noop() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        let result = shape.vertex(&mut device, Point::new(1.0, 1.0));
        assert_eq!(result, Err(ShapeError::NotBuilding.into()));
        assert!(!shape.is_renderable());
        assert_eq!(device.calls("begin_figure"), 0);
        assert_eq!(device.calls("add_line"), 0);
    }

    #[test]
    fn test_begin_vertices_end_is_renderable() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();
        triangle(&mut shape, &mut device);
        assert!(!shape.is_renderable());

        shape.end(&mut device, FigureEnd::Closed).unwrap();
        assert!(shape.is_renderable());
        assert!(!shape.is_building());

        let geometry = device.geometry(shape.geometry().unwrap().0).unwrap();
        assert!(geometry.closed);
        assert_eq!(geometry.figures.len(), 1);
        assert_eq!(geometry.figures[0].end, Some(FigureEnd::Closed));
        assert_eq!(
            geometry.figures[0].points(),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_double_begin_stops_building() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        shape.begin(&mut device).unwrap();
        let result = shape.begin(&mut device);
        assert_eq!(result, Err(ShapeError::AlreadyBuilding.into()));
        assert!(!shape.is_building());
        assert!(!shape.is_renderable());

        // and the builder is usable again
        triangle(&mut shape, &mut device);
        shape.end(&mut device, FigureEnd::Open).unwrap();
        assert!(shape.is_renderable());
    }

    #[test]
    fn test_end_without_figure() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        shape.begin(&mut device).unwrap();
        shape.end(&mut device, FigureEnd::Closed).unwrap();
        assert!(!shape.is_renderable());
        assert_eq!(device.calls("end_figure"), 0);
        assert_eq!(device.calls("close_sink"), 0);

        assert_eq!(
            shape.end(&mut device, FigureEnd::Closed),
            Err(ShapeError::NotBuilding.into())
        );
    }

    #[test]
    fn test_curve_opens_figure() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        shape.begin(&mut device).unwrap();
        shape
            .quadratic_bezier(&mut device, Point::new(5.0, 5.0), Point::new(1.0, 1.0))
            .unwrap();
        shape
            .bezier(
                &mut device,
                Point::new(2.0, 0.0),
                Point::new(3.0, 0.0),
                Point::new(4.0, 4.0),
            )
            .unwrap();
        shape
            .arc(
                &mut device,
                Point::new(8.0, 4.0),
                Vec2::splat(2.0),
                0.0,
                SweepDirection::Clockwise,
                ArcSize::Small,
            )
            .unwrap();
        shape.end(&mut device, FigureEnd::Open).unwrap();

        assert!(shape.is_renderable());
        let geometry = device.geometry(shape.geometry().unwrap().0).unwrap();
        let figure = &geometry.figures[0];
        assert_eq!(figure.start, Point::new(1.0, 1.0));
        assert_eq!(figure.segments.len(), 2);
        assert!(matches!(figure.segments[0], RecordedSegment::Bezier(_)));
        assert!(matches!(figure.segments[1], RecordedSegment::Arc(_)));
    }

    #[test]
    fn test_settings_locked_while_building() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        shape.set_fill_mode(FillMode::Winding).unwrap();
        shape.begin(&mut device).unwrap();
        assert!(shape.set_fill_mode(FillMode::Alternate).is_err());
        assert!(shape.set_segment_flag(PathSegment::Unstroked).is_err());
        assert_eq!(shape.fill_mode(), FillMode::Winding);

        shape.vertex(&mut device, Point::ZERO).unwrap();
        shape.end(&mut device, FigureEnd::Closed).unwrap();
        let geometry = device.geometry(shape.geometry().unwrap().0).unwrap();
        assert_eq!(geometry.fill_mode, FillMode::Winding);
    }

    #[test]
    fn test_allocation_failure_leaves_idle() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();

        device.fail_next(ResourceKind::PathGeometry);
        assert!(shape.begin(&mut device).is_err());
        assert!(!shape.is_building());

        device.fail_next(ResourceKind::GeometrySink);
        assert!(shape.begin(&mut device).is_err());
        assert!(!shape.is_building());
    }

    #[test]
    fn test_failed_begin_keeps_finished_geometry() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();
        triangle(&mut shape, &mut device);
        shape.end(&mut device, FigureEnd::Closed).unwrap();
        let finished = shape.geometry().unwrap().0;

        device.fail_next(ResourceKind::PathGeometry);
        assert!(shape.begin(&mut device).is_err());
        assert!(!shape.is_building());
        assert!(shape.is_renderable());
        assert_eq!(shape.geometry().unwrap().0, finished);

        device.fail_next(ResourceKind::GeometrySink);
        assert!(shape.begin(&mut device).is_err());
        assert!(!shape.is_building());
        assert!(shape.is_renderable());
        assert_eq!(shape.geometry().unwrap().0, finished);
    }

    #[test]
    fn test_close_failure_is_not_renderable() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();
        triangle(&mut shape, &mut device);

        device.fail_next(ResourceKind::SinkClose);
        assert!(matches!(
            shape.end(&mut device, FigureEnd::Closed),
            Err(GraphicsError::GeometryClose(_))
        ));
        assert!(!shape.is_renderable());
        assert!(!shape.is_building());
    }

    #[test]
    fn test_begin_discards_previous_geometry() {
        let mut device = RecordingDevice::new();
        let mut shape = Shape::new();
        triangle(&mut shape, &mut device);
        shape.end(&mut device, FigureEnd::Closed).unwrap();
        assert!(shape.is_renderable());

        shape.begin(&mut device).unwrap();
        assert!(!shape.is_renderable());
        assert!(shape.geometry().is_none());
    }

    #[test]
    fn test_polygon() {
        let mut device = RecordingDevice::new();
        let points = [
            Point::ZERO,
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let geometry = Shape::<RecordingDevice>::polygon(
            &mut device,
            &points,
            FigureEnd::Closed,
            FillMode::Alternate,
        )
        .unwrap();
        let record = device.geometry(geometry.0).unwrap();
        assert!(record.closed);
        assert_eq!(record.figures[0].points(), points.to_vec());

        let empty = Shape::<RecordingDevice>::polygon(
            &mut device,
            &[],
            FigureEnd::Closed,
            FillMode::Alternate,
        );
        assert!(empty.is_err());
    }
}
