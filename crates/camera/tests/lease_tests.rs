use camera::{
    testing::{Call, SimulatedBackend},
    *,
};

#[test]
fn test_release_happens_once() {
    let mut backend = SimulatedBackend::default();
    let journal = backend.journal();
    let lease = DeviceLease::new(backend.open(1).unwrap());

    lease.release();
    assert_eq!(journal.count(&Call::Release), 1);
}

#[test]
fn test_drop_releases() {
    let mut backend = SimulatedBackend::default();
    let journal = backend.journal();
    {
        let _lease = DeviceLease::new(backend.open(0).unwrap());
    }
    assert_eq!(journal.count(&Call::Release), 1);
}

#[test]
fn test_failed_release_is_swallowed() {
    let mut backend = SimulatedBackend::default().with_failing_release();
    let journal = backend.journal();
    let lease = DeviceLease::new(backend.open(0).unwrap());

    lease.release();
    assert_eq!(journal.count(&Call::Release), 1);
}

#[test]
fn test_lease_derefs_to_handle() {
    let mut backend = SimulatedBackend::default();
    let journal = backend.journal();
    let mut lease = DeviceLease::new(backend.open(0).unwrap());

    let sizes = lease.supported_preview_sizes().unwrap();
    lease.set_preview_size(sizes[0]).unwrap();
    assert_eq!(lease.preview_size().unwrap(), sizes[0]);
    assert_eq!(journal.count(&Call::SetPreviewSize(sizes[0])), 1);
}

#[test]
fn test_open_unknown_camera() {
    let mut backend = SimulatedBackend::default();
    let err = backend.open(7).unwrap_err();
    assert!(matches!(err, CameraError::DeviceOpenFailed(_)));
}
