//! Messaging service tests: thread uniqueness, read-state, access control.

mod common;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tutormarket::domain::{Message, Role, Thread};
use tutormarket::errors::AppError;
use tutormarket::infra::repositories::{MockThreadRepository, MockUserRepository};
use tutormarket::services::{Messenger, MessagingService};

use common::{test_actor, test_user, TestUnitOfWork};

fn test_thread(id: Uuid) -> Thread {
    Thread {
        id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_message(thread_id: Uuid, sender_id: Uuid, is_read: bool) -> Message {
    Message {
        id: Uuid::new_v4(),
        thread_id,
        sender_id,
        content: "Bonjour".to_string(),
        is_read,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn start_thread_reuses_the_existing_pair_thread() {
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();
    let thread_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Tutor))));

    let mut threads = MockThreadRepository::new();
    threads
        .expect_find_between()
        .returning(move |_, _| Ok(Some(test_thread(thread_id))));
    // expect_create absent on purpose: a duplicate thread would panic

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        threads: Arc::new(threads),
        ..Default::default()
    };
    let service = Messenger::new(Arc::new(uow));

    let actor = test_actor(me, Role::Parent);
    let first = service.start_thread(&actor, other).await.unwrap();
    let second = service.start_thread(&actor, other).await.unwrap();

    assert_eq!(first.id, thread_id);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn start_thread_creates_when_none_exists() {
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Tutor))));

    let mut threads = MockThreadRepository::new();
    threads.expect_find_between().returning(|_, _| Ok(None));
    threads
        .expect_create()
        .times(1)
        .returning(|_, _| Ok(test_thread(Uuid::new_v4())));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        threads: Arc::new(threads),
        ..Default::default()
    };
    let service = Messenger::new(Arc::new(uow));

    let actor = test_actor(me, Role::Parent);
    assert!(service.start_thread(&actor, other).await.is_ok());
}

#[tokio::test]
async fn cannot_message_yourself() {
    let me = Uuid::new_v4();
    let service = Messenger::new(Arc::new(TestUnitOfWork::default()));

    let actor = test_actor(me, Role::Parent);
    let result = service.start_thread(&actor, me).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn opening_a_thread_marks_the_other_sides_messages_read() {
    let me = Uuid::new_v4();
    let other = Uuid::new_v4();
    let thread_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, Role::Parent))));

    let mut threads = MockThreadRepository::new();
    threads
        .expect_find()
        .returning(|id| Ok(Some(test_thread(id))));
    threads
        .expect_participants()
        .returning(move |_| Ok(vec![me, other]));
    // The bulk mark-read is the point of this test
    threads
        .expect_mark_read()
        .times(1)
        .withf(move |tid, reader| *tid == thread_id && *reader == me)
        .returning(|_, _| Ok(2));
    threads.expect_messages().returning(move |tid| {
        Ok(vec![
            test_message(tid, other, true),
            test_message(tid, me, false),
        ])
    });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        threads: Arc::new(threads),
        ..Default::default()
    };
    let service = Messenger::new(Arc::new(uow));

    let actor = test_actor(me, Role::Parent);
    let detail = service.open_thread(&actor, thread_id).await.unwrap();

    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.other.id, other);
}

#[tokio::test]
async fn non_participants_are_denied() {
    let me = Uuid::new_v4();
    let thread_id = Uuid::new_v4();

    let mut threads = MockThreadRepository::new();
    threads
        .expect_find()
        .returning(|id| Ok(Some(test_thread(id))));
    threads
        .expect_participants()
        .returning(|_| Ok(vec![Uuid::new_v4(), Uuid::new_v4()]));
    // mark_read must not run for outsiders

    let uow = TestUnitOfWork {
        threads: Arc::new(threads),
        ..Default::default()
    };
    let service = Messenger::new(Arc::new(uow));

    let actor = test_actor(me, Role::Parent);
    let result = service.open_thread(&actor, thread_id).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
}

#[tokio::test]
async fn posting_requires_non_empty_content() {
    let service = Messenger::new(Arc::new(TestUnitOfWork::default()));

    let actor = test_actor(Uuid::new_v4(), Role::Parent);
    let result = service
        .post_message(&actor, Uuid::new_v4(), "   ".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn unread_count_spans_all_threads() {
    let me = Uuid::new_v4();

    let mut threads = MockThreadRepository::new();
    threads.expect_unread_total().returning(|_| Ok(7));

    let uow = TestUnitOfWork {
        threads: Arc::new(threads),
        ..Default::default()
    };
    let service = Messenger::new(Arc::new(uow));

    let actor = test_actor(me, Role::Parent);
    assert_eq!(service.unread_count(&actor).await.unwrap(), 7);
}
