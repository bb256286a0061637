use std::{
    collections::VecDeque,
    sync::{Arc, RwLock},
};

use tracing::{error, warn};

use crate::{
    Rejection, ShareLock,
    events::{Event, Notice, NoticeLevel},
};

macro_rules! dispatch_event {
    ($handles:expr, $(&$item:ident), +) => {
        let handlers = $handles.read().unwrap().clone();
        for handle in handlers.iter() {
            (handle)($(&$item),+);
        }
    };
}

const DEFAULT_CAPACITY: usize = 256;

pub type NoticeHandle = Arc<dyn Fn(&Event<Notice>) + Send + Sync>;

/// Fan-out point for editor notices.
///
/// Handlers run synchronously on the emitting thread, in registration order.
/// The most recent `capacity` notices are also retained for inspection.
#[derive(Clone)]
pub struct Notifier {
    handles: ShareLock<Vec<NoticeHandle>>,
    history: ShareLock<VecDeque<Notice>>,
    capacity: usize,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Notifier").field("capacity", &self.capacity).field("history", &self.history.read().unwrap().len()).finish()
    }
}

#[allow(unused)]
impl Notifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            handles: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)))),
            capacity,
        }
    }

    /// publish a notice to every handler and record it
    pub fn notify(
        &self,
        notice: Notice,
    ) {
        match notice.level {
            NoticeLevel::Warning => warn!(code = %notice.code, "{}", notice.message),
            NoticeLevel::Error => error!(code = %notice.code, "{}", notice.message),
            NoticeLevel::Info => {}
        }

        {
            let mut history = self.history.write().unwrap();
            if self.capacity > 0 {
                while history.len() >= self.capacity {
                    history.pop_front();
                }
                history.push_back(notice.clone());
            }
        }

        let evt = Event::new(&notice);
        dispatch_event!(self.handles, &evt);
    }

    /// report a rejected edit, unless the rejection is silent
    pub fn reject(
        &self,
        rejection: &Rejection,
    ) {
        if rejection.is_silent() {
            return;
        }
        self.notify(Notice::from(rejection));
    }

    pub fn warn(
        &self,
        code: &str,
        message: impl Into<String>,
    ) {
        self.notify(Notice::warning(code, message));
    }

    pub fn error(
        &self,
        code: &str,
        message: impl Into<String>,
    ) {
        self.notify(Notice::error(code, message));
    }

    pub fn info(
        &self,
        code: &str,
        message: impl Into<String>,
    ) {
        self.notify(Notice::info(code, message));
    }

    pub fn on_notice(
        &self,
        f: impl Fn(&Event<Notice>) + Send + Sync + 'static,
    ) {
        self.handles.write().unwrap().push(Arc::new(f));
    }

    pub fn on_warning(
        &self,
        f: impl Fn(&Event<Notice>) + Send + Sync + 'static,
    ) {
        self.handles.write().unwrap().push(Arc::new(move |e| {
            if e.is_warning() {
                f(e);
            }
        }));
    }

    pub fn on_error(
        &self,
        f: impl Fn(&Event<Notice>) + Send + Sync + 'static,
    ) {
        self.handles.write().unwrap().push(Arc::new(move |e| {
            if e.is_error() {
                f(e);
            }
        }));
    }

    /// snapshot of the retained notices, oldest first
    pub fn notices(&self) -> Vec<Notice> {
        self.history.read().unwrap().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.history.read().unwrap().back().cloned()
    }

    /// drain the retained notices
    pub fn take(&self) -> Vec<Notice> {
        self.history.write().unwrap().drain(..).collect()
    }

    pub fn clear(&self) {
        self.history.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.history.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.read().unwrap().is_empty()
    }
}
