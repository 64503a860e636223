/// Sink for user-facing messages.
///
/// Delivery is best effort: implementations must not fail or block the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}
