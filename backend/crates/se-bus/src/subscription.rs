use crate::channel_handle::Registration;
use crate::{BroadcastMessage, BusError, BusErrorResult, ChannelHandle, SubscriptionFilter};

use std::panic::{AssertUnwindSafe, Location};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use error_location::ErrorLocation;
use tokio::task::JoinHandle;

/// Callback run once per delivered message
pub type MessageCallback = Box<dyn Fn(&BroadcastMessage) + Send + Sync + 'static>;

/// Lifecycle of one subscription. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// The channel could not be opened; nothing will ever be delivered
    Inactive,
    Active,
    Closed,
}

/// Disposer for a callback subscription.
///
/// `dispose` stops future deliveries and releases the channel handle.
/// Dropping the subscription disposes it.
#[must_use = "dropping a Subscription stops its deliveries"]
pub struct Subscription {
    inner: Option<ActiveSubscription>,
}

struct ActiveSubscription {
    closed: Arc<AtomicBool>,
    registration: Arc<Registration>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// A subscription that never delivers. Returned when subscribing fails.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    /// Run `callback` on a spawned task for every message the handle
    /// receives that passes `filter`.
    #[track_caller]
    pub(crate) fn spawn(
        handle: ChannelHandle,
        filter: SubscriptionFilter,
        callback: MessageCallback,
    ) -> BusErrorResult<Self> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| BusError::NoRuntime {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let closed = Arc::new(AtomicBool::new(false));
        let registration = handle.registration();
        let task = runtime.spawn(deliver(handle, filter, callback, Arc::clone(&closed)));

        Ok(Self {
            inner: Some(ActiveSubscription {
                closed,
                registration,
                task,
            }),
        })
    }

    pub fn state(&self) -> SubscriptionState {
        match self.inner {
            None => SubscriptionState::Inactive,
            Some(ref active) if active.closed.load(Ordering::SeqCst) => SubscriptionState::Closed,
            Some(_) => SubscriptionState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == SubscriptionState::Active
    }

    /// Stop listening. Calling this again, or on a no-op subscription, does
    /// nothing.
    pub fn dispose(&self) {
        let Some(ref active) = self.inner else {
            return;
        };

        if active.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        active.registration.release();
        active.task.abort();
        log::debug!("Subscription disposed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("state", &self.state())
            .finish()
    }
}

async fn deliver(
    mut handle: ChannelHandle,
    filter: SubscriptionFilter,
    callback: MessageCallback,
    closed: Arc<AtomicBool>,
) {
    loop {
        match handle.recv().await {
            Ok(Some(message)) => {
                if closed.load(Ordering::SeqCst) {
                    break;
                }

                if !filter.matches(&message) {
                    continue;
                }

                let result = std::panic::catch_unwind(AssertUnwindSafe(|| callback(&message)));
                if result.is_err() {
                    log::error!(
                        "Subscriber callback on channel {} panicked handling {} message; subscription stays active",
                        handle.name(),
                        message.event_type()
                    );
                }
            }
            Ok(None) => {
                if !closed.load(Ordering::SeqCst) {
                    log::info!(
                        "Channel {} closed, ending subscription {}",
                        handle.name(),
                        handle.id()
                    );
                }
                break;
            }
            Err(e) => {
                log::warn!(
                    "Subscription {} on channel {}: {}",
                    handle.id(),
                    handle.name(),
                    e
                );
            }
        }
    }

    closed.store(true, Ordering::SeqCst);
}
