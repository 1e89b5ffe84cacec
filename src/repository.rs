//! Task storage interface.
//!
//! Persistence itself is outside this crate; the navigation core only
//! requires the contract below. [`InMemoryTaskRepository`] is a reference
//! implementation for tests and demos.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::channel::mpsc;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;

use crate::error::OrganizerResult;

/// Opaque task identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub done_date: Option<NaiveDate>,
}

/// CRUD plus reactive reads over task records.
///
/// The watch streams yield a snapshot immediately on subscription and a new
/// one after every mutation.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert_task(&self, text: String, due_date: Option<NaiveDate>)
    -> OrganizerResult<TaskId>;
    async fn update_task(&self, task: Task) -> OrganizerResult<()>;
    async fn delete_task(&self, id: TaskId) -> OrganizerResult<()>;
    async fn set_text(&self, id: TaskId, text: String) -> OrganizerResult<()>;
    async fn set_due_date(&self, id: TaskId, date: Option<NaiveDate>) -> OrganizerResult<()>;
    async fn set_done_date(&self, id: TaskId, date: Option<NaiveDate>) -> OrganizerResult<()>;

    /// Continuously updated view of a single task; `None` once deleted.
    fn watch_task(&self, id: TaskId) -> BoxStream<'static, Option<Task>>;

    /// Continuously updated view of all tasks, ordered by id.
    fn watch_all_tasks(&self) -> BoxStream<'static, Vec<Task>>;
}

#[derive(Debug, Default)]
struct RepositoryInner {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
    subscribers: Vec<mpsc::UnboundedSender<Vec<Task>>>,
}

impl RepositoryInner {
    fn snapshot(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}

/// Mutex-guarded in-memory repository with fan-out change notification.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    inner: Arc<Mutex<RepositoryInner>>,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribe(&self) -> (Vec<Task>, mpsc::UnboundedReceiver<Vec<Task>>) {
        let mut inner = self.inner.lock();
        let (tx, rx) = mpsc::unbounded();
        inner.subscribers.push(tx);
        (inner.snapshot(), rx)
    }

    fn mutate(&self, apply: impl FnOnce(&mut RepositoryInner) -> OrganizerResult<()>) -> OrganizerResult<()> {
        let mut inner = self.inner.lock();
        apply(&mut inner)?;
        inner.notify();
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert_task(
        &self,
        text: String,
        due_date: Option<NaiveDate>,
    ) -> OrganizerResult<TaskId> {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = TaskId(inner.next_id);
        inner.tasks.insert(
            id,
            Task {
                id,
                text,
                due_date,
                done_date: None,
            },
        );
        inner.notify();
        Ok(id)
    }

    async fn update_task(&self, task: Task) -> OrganizerResult<()> {
        self.mutate(|inner| {
            inner.tasks.insert(task.id, task);
            Ok(())
        })
    }

    async fn delete_task(&self, id: TaskId) -> OrganizerResult<()> {
        self.mutate(|inner| {
            inner.tasks.remove(&id);
            Ok(())
        })
    }

    async fn set_text(&self, id: TaskId, text: String) -> OrganizerResult<()> {
        self.mutate(|inner| {
            if let Some(task) = inner.tasks.get_mut(&id) {
                task.text = text;
            }
            Ok(())
        })
    }

    async fn set_due_date(&self, id: TaskId, date: Option<NaiveDate>) -> OrganizerResult<()> {
        self.mutate(|inner| {
            if let Some(task) = inner.tasks.get_mut(&id) {
                task.due_date = date;
            }
            Ok(())
        })
    }

    async fn set_done_date(&self, id: TaskId, date: Option<NaiveDate>) -> OrganizerResult<()> {
        self.mutate(|inner| {
            if let Some(task) = inner.tasks.get_mut(&id) {
                task.done_date = date;
            }
            Ok(())
        })
    }

    fn watch_task(&self, id: TaskId) -> BoxStream<'static, Option<Task>> {
        self.watch_all_tasks()
            .map(move |tasks| tasks.into_iter().find(|task| task.id == id))
            .boxed()
    }

    fn watch_all_tasks(&self) -> BoxStream<'static, Vec<Task>> {
        let (initial, rx) = self.subscribe();
        stream::once(async move { initial }).chain(rx).boxed()
    }
}
