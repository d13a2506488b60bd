//! Property-based tests for access control, roster invariants and validation
//!
//! Uses proptest to generate random inputs and verify properties

use chrono::Utc;
use proptest::prelude::*;
use studycollab::backend::collab::memory::MemorySessionStore;
use studycollab::backend::collab::store::{NewSession, SessionStore};
use studycollab::shared::{Limits, Role, Session};
use uuid::Uuid;

fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn session_with(owner: Uuid, participants: Vec<Uuid>) -> Session {
    let now = Utc::now();
    Session {
        id: Uuid::new_v4(),
        title: "t".into(),
        content: String::new(),
        owner_id: owner,
        participants,
        is_active: true,
        version: 1,
        created_at: now,
        last_activity: now,
    }
}

proptest! {
    #[test]
    fn test_role_of_matches_membership(
        owner in uuid_strategy(),
        participants in prop::collection::vec(uuid_strategy(), 0..8),
        stranger in uuid_strategy(),
    ) {
        prop_assume!(!participants.contains(&owner));
        prop_assume!(stranger != owner && !participants.contains(&stranger));
        let session = session_with(owner, participants.clone());

        prop_assert_eq!(session.role_of(owner), Role::Owner);
        for p in &participants {
            prop_assert_eq!(session.role_of(*p), Role::Participant);
        }
        prop_assert_eq!(session.role_of(stranger), Role::None);
        prop_assert!(!session.role_of(stranger).is_member());
    }

    #[test]
    fn test_joins_keep_roster_unique_and_owner_free(
        joins in prop::collection::vec(0usize..4, 1..20),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = MemorySessionStore::new();
            let owner = Uuid::new_v4();
            let users = [owner, Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
            let session = store
                .create_session(NewSession { title: "t".into(), content: String::new(), owner_id: owner })
                .await
                .unwrap();

            for index in &joins {
                store.add_participant(session.id, users[*index]).await.unwrap();
            }

            let session = store.get_session(session.id).await.unwrap().unwrap();
            let mut unique = session.participants.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), session.participants.len());
            assert!(!session.participants.contains(&owner));
        });
    }

    #[test]
    fn test_title_validation(title in "\\PC{0,250}") {
        let limits = Limits::default();
        let trimmed = title.trim();
        let expected_ok = !trimmed.is_empty() && trimmed.chars().count() <= limits.max_title_chars;

        match limits.validate_title(&title) {
            Ok(valid) => {
                prop_assert!(expected_ok);
                prop_assert_eq!(valid.as_str(), trimmed);
            }
            Err(err) => {
                prop_assert!(!expected_ok);
                prop_assert_eq!(err.field(), Some("title"));
            }
        }
    }

    #[test]
    fn test_message_text_bound_counts_chars(repeat in 1usize..40) {
        let limits = Limits { max_message_chars: 20, ..Limits::default() };
        let text = "é".repeat(repeat);
        prop_assert_eq!(limits.validate_message_text("text", &text).is_ok(), repeat <= 20);
    }
}
