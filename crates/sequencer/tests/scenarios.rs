use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
};

use handsign::{
    animation::Interpolation,
    backend::RecordingBackend,
    batch::{BackendRunner, BatchDriver, HandsignBatchError},
    core::{AnimationBackend, EulerAngles, HandsignCoreError, RenderFormat, Rotation},
    gesture::{GestureDefinition, JointAngleTable},
    render_gesture, write_gesture, Skeleton,
};
use indexmap::IndexMap;

fn index_base() -> GestureDefinition {
    GestureDefinition::new("a").with_fingers(JointAngleTable::new().with(
        "index",
        "base",
        EulerAngles::degrees(10.0, 20.0, 30.0),
    ))
}

#[test]
fn single_entry_yields_four_samples() {
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    write_gesture(&index_base(), &mut backend).unwrap();

    let keys = backend.keys("SMPLX-female", "right_index1").unwrap();
    assert_eq!(keys.keys().copied().collect::<Vec<_>>(), vec![1, 20, 60, 90]);

    let expected = Rotation::from_radians(0.1745, 0.3491, 0.5236);
    assert!(keys[&1].is_zero());
    assert!(keys[&20].abs_diff_eq(expected, 1e-4));
    assert!(keys[&60].abs_diff_eq(expected, 1e-4));
    assert!(keys[&90].is_zero());

    assert_eq!(backend.keyed_channels("SMPLX-female"), vec!["right_index1"]);
    assert_eq!(backend.frame_range(), Some((1, 90)));
}

#[test]
fn unavailable_channel_yields_nothing() {
    let skeleton = Skeleton::default().without("right_index1");
    let mut backend = RecordingBackend::with_skeleton(&skeleton);

    let sequence = write_gesture(&index_base(), &mut backend).unwrap();

    assert!(sequence.is_empty());
    assert_eq!(backend.keyframe_count(), 0);
}

#[test]
fn missing_armature_is_fatal() {
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::smplx("SMPLX-male"));
    assert!(matches!(
        write_gesture(&index_base(), &mut backend),
        Err(HandsignCoreError::MissingObject(name)) if name == "SMPLX-female"
    ));
}

#[test]
fn rewriting_starts_from_cleared_state() {
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    write_gesture(&index_base(), &mut backend).unwrap();

    let thumb = GestureDefinition::new("b").with_fingers(JointAngleTable::new().with(
        "thumb",
        "tip",
        EulerAngles::degrees(5.0, 0.0, 0.0),
    ));
    write_gesture(&thumb, &mut backend).unwrap();

    assert_eq!(backend.keyed_channels("SMPLX-female"), vec!["right_thumb3"]);
}

#[test]
fn held_pose_between_keys() {
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    write_gesture(&index_base(), &mut backend).unwrap();

    let held = backend
        .sample("SMPLX-female", "right_index1", 40.0, Interpolation::Linear)
        .unwrap();
    assert!(held.abs_diff_eq(Rotation::from_degrees(10.0, 20.0, 30.0), 1e-12));
}

#[test]
fn render_uses_default_background() {
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    render_gesture(
        &index_base(),
        &mut backend,
        Path::new("out/a.mp4"),
        RenderFormat::default(),
        Some(Path::new("bg.png")),
    )
    .unwrap();

    let render = &backend.renders()[0];
    assert_eq!(render.output, PathBuf::from("out/a.mp4"));
    assert_eq!(render.background.as_deref(), Some(Path::new("bg.png")));
    assert_eq!(render.keyframes, 4);
}

#[test]
fn batch_skips_missing_definition() {
    let source = IndexMap::from([("a".to_string(), index_base())]);
    let driver = BatchDriver::new(source, "clips");
    let renders = RefCell::new(Vec::new());

    let mut runner = BackendRunner::new(|| RecordingBackend::with_skeleton(&Skeleton::default()));
    let report = driver
        .run(["a", "b"], &mut |id: &str, definition: &GestureDefinition, output: &Path| {
            renders.borrow_mut().push(id.to_string());
            handsign::batch::GestureRunner::run(&mut runner, id, definition, output)
        })
        .unwrap();

    assert_eq!(report.rendered, vec![PathBuf::from("clips/a.mp4")]);
    assert_eq!(report.skipped, vec!["b".to_string()]);
    assert_eq!(renders.into_inner(), vec!["a".to_string()]);
}

/// Renders through `inner` unless `fail` is set.
struct FailingBackend {
    inner: RecordingBackend,
    fail: bool,
}

impl AnimationBackend for FailingBackend {
    fn clear_animation(&mut self, object: &str) -> handsign::core::Result<()> {
        self.inner.clear_animation(object)
    }

    fn channel_exists(&self, object: &str, channel: &str) -> bool {
        self.inner.channel_exists(object, channel)
    }

    fn set_rotation(&mut self, object: &str, channel: &str, rotation: Rotation) -> handsign::core::Result<()> {
        self.inner.set_rotation(object, channel, rotation)
    }

    fn insert_keyframe(&mut self, object: &str, channel: &str, frame: u32) -> handsign::core::Result<()> {
        self.inner.insert_keyframe(object, channel, frame)
    }

    fn set_frame_range(&mut self, start: u32, end: u32) -> handsign::core::Result<()> {
        self.inner.set_frame_range(start, end)
    }

    fn set_background_image(&mut self, path: &Path) -> handsign::core::Result<()> {
        self.inner.set_background_image(path)
    }

    fn render_animation(&mut self, output: &Path, format: RenderFormat) -> handsign::core::Result<()> {
        if self.fail {
            return Err(HandsignCoreError::ProcessExit {
                program: "blender".to_string(),
                code: Some(1),
            });
        }
        self.inner.render_animation(output, format)
    }
}

#[test]
fn batch_stops_at_first_failure() {
    let source: IndexMap<String, GestureDefinition> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|id| (id.to_string(), GestureDefinition::new(id)))
        .collect();
    let driver = BatchDriver::new(source, "clips");
    let attempted = Cell::new(0);

    let mut runner = BackendRunner::new(|| {
        let fail = attempted.get() == 2;
        attempted.set(attempted.get() + 1);
        FailingBackend {
            inner: RecordingBackend::with_skeleton(&Skeleton::default()),
            fail,
        }
    });

    let err = driver.run(["a", "b", "c", "d"], &mut runner).unwrap_err();

    assert!(matches!(
        err,
        HandsignBatchError::Render { ref id, source: HandsignCoreError::ProcessExit { code: Some(1), .. } } if id == "c"
    ));
    assert_eq!(attempted.get(), 3);
}

#[cfg(feature = "builtin-gestures")]
#[test]
fn builtin_gestures_render() {
    use handsign::gesture::{BuiltinGestures, GestureSource};

    let builtin = BuiltinGestures;
    let ids = builtin.ids().unwrap();
    let driver = BatchDriver::new(builtin, "clips");
    let mut runner = BackendRunner::new(|| RecordingBackend::with_skeleton(&Skeleton::default()));

    let report = driver.run(&ids, &mut runner).unwrap();
    assert_eq!(report.rendered.len(), ids.len());
    assert!(report.skipped.is_empty());
}

#[cfg(feature = "builtin-gestures")]
#[test]
fn hello_wave_keys_wrist_and_shoulder() {
    use handsign::gesture::{BuiltinGestures, GestureSource};

    let hello = BuiltinGestures.find("hello").unwrap().unwrap();
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    write_gesture(&hello, &mut backend).unwrap();

    let wrist = backend.keys("SMPLX-female", "right_wrist").unwrap();
    assert_eq!(
        wrist.keys().copied().collect::<Vec<_>>(),
        vec![1, 20, 30, 40, 50, 60, 90]
    );
    assert!(backend.keys("SMPLX-female", "right_shoulder").is_some());
}

#[cfg(feature = "builtin-gestures")]
#[test]
fn namaste_uses_extended_timeline() {
    use handsign::gesture::{BuiltinGestures, GestureSource};

    let namaste = BuiltinGestures.find("namaste").unwrap().unwrap();
    let mut backend = RecordingBackend::with_skeleton(&Skeleton::default());
    write_gesture(&namaste, &mut backend).unwrap();

    assert_eq!(backend.frame_range(), Some((1, 100)));
    for channel in backend.keyed_channels("SMPLX-female") {
        let keys = backend.keys("SMPLX-female", channel).unwrap();
        assert_eq!(keys.keys().copied().collect::<Vec<_>>(), vec![1, 20, 40, 60, 80, 100]);
        assert!(keys[&1].is_zero(), "{channel}");
    }
}
