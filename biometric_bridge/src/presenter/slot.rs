use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// At most one custom surface is visible per [`crate::BiometricAuth`].
///
/// A lease is taken when presentation starts and released when it is dropped
/// on the request's terminal transition.
#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceSlot {
    occupied: Arc<AtomicBool>,
}

impl SurfaceSlot {
    pub(crate) fn try_acquire(&self) -> Option<SurfaceLease> {
        self.occupied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SurfaceLease {
                occupied: self.occupied.clone(),
            })
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub(crate) struct SurfaceLease {
    occupied: Arc<AtomicBool>,
}

impl Drop for SurfaceLease {
    fn drop(&mut self) {
        self.occupied.store(false, Ordering::Release);
    }
}
