//! Frame loop tests over the recording device

use std::io::Write;

use easel_app::prelude::*;
use easel_core::recording::{DeviceCommand, RecordingDevice};

/// Counts calls and draws one filled rect per frame
#[derive(Default)]
struct Counter {
    setups: u32,
    draws: u32,
}

impl Sketch<RecordingDevice> for Counter {
    fn setup(&mut self, target: &mut RenderTarget<RecordingDevice>) {
        self.setups += 1;
        target.fill(Color::rgb8(182, 40, 210));
    }

    fn draw(&mut self, target: &mut RenderTarget<RecordingDevice>) {
        self.draws += 1;
        target.push();
        target.translate(10.0, 10.0);
        target.pop();
        target.rect(200.0, 200.0, 100.0, 100.0);
    }
}

fn device(runner: &SketchRunner<RecordingDevice, Counter>) -> &RecordingDevice {
    runner.target().device().expect("device attached")
}

fn counter_runner() -> SketchRunner<RecordingDevice, Counter> {
    SketchRunner::new(
        SketchConfig::default(),
        RecordingDevice::new(),
        Counter::default(),
    )
}

#[test]
fn test_setup_runs_once() {
    let mut runner = counter_runner();
    assert_eq!(runner.run_frames(4).unwrap(), 4);
    assert_eq!(runner.frame_count(), 4);
    assert_eq!(runner.sketch().setups, 1);
    assert_eq!(runner.sketch().draws, 4);

    // the fill set in setup lives in the default style and survives frames
    assert_eq!(device(&runner).calls("fill_rounded_rectangle"), 4);
    assert_eq!(device(&runner).calls("create_solid_color_brush"), 1);
}

#[test]
fn test_frame_sequence() {
    let config = SketchConfig {
        background: Some([255, 255, 255, 255]),
        ..Default::default()
    };
    let mut runner = SketchRunner::new(config, RecordingDevice::new(), Counter::default());
    assert_eq!(runner.frame().unwrap(), FrameOutcome::Presented);

    let commands = device(&runner).commands();
    assert_eq!(commands.first(), Some(&DeviceCommand::BeginDraw));
    assert_eq!(commands.get(1), Some(&DeviceCommand::Clear(Color::WHITE)));
    assert_eq!(commands.last(), Some(&DeviceCommand::EndDraw));
    assert_eq!(runner.target().states().depth(), 1);
}

#[test]
fn test_new_sizes_device() {
    let config = SketchConfig {
        width: 320,
        height: 240,
        ..Default::default()
    };
    let mut runner = SketchRunner::new(config, RecordingDevice::new(), Counter::default());
    assert_eq!(runner.target().size(), Size::new(320.0, 240.0));

    runner.resize(640, 480);
    assert_eq!(runner.target().size(), Size::new(640.0, 480.0));
    assert_eq!(runner.config().width, 640);

    runner.resize(0, 480);
    assert_eq!(runner.target().size(), Size::new(640.0, 480.0));
}

#[test]
fn test_device_lost_abandons_frame_and_reruns_setup() {
    let mut runner = counter_runner();
    runner.frame().unwrap();

    runner.target_mut().device_mut().unwrap().lose_device();
    assert_eq!(runner.frame().unwrap(), FrameOutcome::Abandoned);
    assert_eq!(runner.frame_count(), 1);
    assert_eq!(device(&runner).calls("recreate"), 1);

    assert_eq!(runner.frame().unwrap(), FrameOutcome::Presented);
    assert_eq!(runner.frame_count(), 2);
    assert_eq!(runner.sketch().setups, 2);
    assert_eq!(device(&runner).calls("create_solid_color_brush"), 2);
}

#[test]
fn test_shutdown_returns_device_and_sketch() {
    let mut runner = counter_runner();
    runner.run_frames(2).unwrap();

    let (device, sketch) = runner.shutdown();
    assert_eq!(device.unwrap().calls("end_draw"), 2);
    assert_eq!(sketch.draws, 2);
}

#[test]
fn test_frame_without_device_fails() {
    let mut runner = counter_runner();
    runner.target_mut().cleanup();
    assert!(matches!(
        runner.frame(),
        Err(EaselError::Graphics(easel_core::GraphicsError::NoDevice))
    ));
}

#[test]
fn test_closure_sketch_paced_run() {
    let config = SketchConfig {
        frame_rate: 1000.0,
        ..Default::default()
    };
    let sketch = |target: &mut RenderTarget<RecordingDevice>| {
        target.stroke(Color::BLACK);
        target.line(0.0, 0.0, 10.0, 10.0);
    };
    let mut runner = SketchRunner::new(config, RecordingDevice::new(), sketch);
    assert_eq!(runner.run(3).unwrap(), 3);
    assert_eq!(runner.target().device().unwrap().calls("draw_line"), 3);
}

#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!("easel_sketch_{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "title = \"Orbits\"\nframe_rate = 30.0").unwrap();
    drop(file);

    let config = SketchConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.title, "Orbits");
    assert_eq!(config.frame_rate, 30.0);

    assert!(matches!(
        SketchConfig::load(&path),
        Err(EaselError::Io(_))
    ));
}
