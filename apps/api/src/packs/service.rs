//! Pack lifecycle.
//!
//! Creation flow: validate → market estimate → negotiation document →
//!                persist. Nothing is stored unless every step succeeds.
//! Deletion removes the pack's role-play session before the pack itself.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generate_negotiation_content;
use crate::llm_client::CompletionProvider;
use crate::market::MarketDataSource;
use crate::models::pack::Pack;
use crate::packs::validation::{validate_pack_request, CreatePackRequest};
use crate::store::{PackStore, SessionStore};

pub async fn create_pack(
    packs: &dyn PackStore,
    market: &dyn MarketDataSource,
    llm: &dyn CompletionProvider,
    owner_id: Uuid,
    request: CreatePackRequest,
) -> Result<Pack, AppError> {
    let inputs = validate_pack_request(request)?;

    let market_data = market
        .market_data(&inputs.job_title, &inputs.city_or_remote)
        .await;
    info!(
        "Market estimate for '{}' in '{}': avg={} range={}-{}",
        inputs.job_title, inputs.city_or_remote, market_data.average, market_data.p25, market_data.p75
    );

    let document = generate_negotiation_content(llm, &inputs, &market_data).await;

    let pack = Pack {
        id: Uuid::new_v4(),
        user_id: owner_id,
        job_title: inputs.job_title,
        city_or_remote: inputs.city_or_remote,
        current_salary: inputs.current_salary,
        target_salary: inputs.target_salary,
        achievements: inputs.achievements,
        market_data,
        negotiation_content: document.markdown,
        created_at: Utc::now(),
    };

    packs.insert_pack(&pack).await?;

    info!(
        "Created pack {} for user {} (content source: {:?})",
        pack.id, owner_id, document.source
    );
    Ok(pack)
}

/// Read-only; a pack owned by someone else is indistinguishable from a missing one.
pub async fn get_pack(
    packs: &dyn PackStore,
    owner_id: Uuid,
    pack_id: Uuid,
) -> Result<Pack, AppError> {
    packs
        .find_pack(owner_id, pack_id)
        .await?
        .ok_or_else(|| AppError::pack_not_found(pack_id))
}

pub async fn list_packs(packs: &dyn PackStore, owner_id: Uuid) -> Result<Vec<Pack>, AppError> {
    Ok(packs.list_packs(owner_id).await?)
}

pub async fn delete_pack(
    packs: &dyn PackStore,
    sessions: &dyn SessionStore,
    owner_id: Uuid,
    pack_id: Uuid,
) -> Result<(), AppError> {
    get_pack(packs, owner_id, pack_id).await?;

    sessions.delete_session_for_pack(pack_id).await?;

    if !packs.delete_pack(owner_id, pack_id).await? {
        return Err(AppError::pack_not_found(pack_id));
    }

    info!("Deleted pack {pack_id} and its role-play session for user {owner_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generator::REQUIRED_SECTIONS;
    use crate::market::TableEstimator;
    use crate::models::session::{ChatMessage, ChatRole};
    use crate::store::MemoryStore;
    use crate::testing::{FailingPackStore, StubProvider};

    fn request(achievement_count: usize) -> CreatePackRequest {
        CreatePackRequest {
            job_title: "Software Engineer".to_string(),
            city_or_remote: "Remote".to_string(),
            current_salary: Some(95_000),
            target_salary: Some(130_000),
            achievements: (1..=achievement_count)
                .map(|i| format!("Shipped project {i}"))
                .collect(),
        }
    }

    async fn create(store: &MemoryStore, owner: Uuid, count: usize) -> Result<Pack, AppError> {
        create_pack(
            store,
            &TableEstimator,
            &StubProvider::failing(),
            owner,
            request(count),
        )
        .await
    }

    #[tokio::test]
    async fn test_achievement_count_boundary() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        assert!(matches!(
            create(&store, owner, 2).await,
            Err(AppError::Validation(_))
        ));
        assert!(store.list_packs(owner).await.unwrap().is_empty(), "no partial pack");

        let pack = create(&store, owner, 3).await.unwrap();
        assert_eq!(pack.achievements.len(), 3);
    }

    #[tokio::test]
    async fn test_created_pack_carries_market_data_and_document() {
        let store = MemoryStore::new();
        let pack = create(&store, Uuid::new_v4(), 4).await.unwrap();

        assert_eq!(pack.market_data.average, 120_000);
        assert_eq!(pack.market_data.p25, 102_000);
        assert_eq!(pack.market_data.p75, 144_000);
        for section in REQUIRED_SECTIONS {
            assert!(pack.negotiation_content.contains(section));
        }
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_persistence_error() {
        let llm = StubProvider::failing();
        let result = create_pack(
            &FailingPackStore,
            &TableEstimator,
            &llm,
            Uuid::new_v4(),
            request(3),
        )
        .await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_get_pack_is_idempotent() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let pack = create(&store, owner, 3).await.unwrap();

        let first = get_pack(&store, owner, pack.id).await.unwrap();
        let second = get_pack(&store, owner, pack.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, pack);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_read_or_delete() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let pack = create(&store, owner, 3).await.unwrap();

        assert!(matches!(
            get_pack(&store, stranger, pack.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_pack(&store, &store, stranger, pack.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(get_pack(&store, owner, pack.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_session() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let pack = create(&store, owner, 3).await.unwrap();

        let messages = vec![ChatMessage::new(ChatRole::User, "Hi", Utc::now())];
        store
            .upsert_messages(pack.id, &messages, Utc::now())
            .await
            .unwrap();

        delete_pack(&store, &store, owner, pack.id).await.unwrap();

        assert!(store.find_session_by_pack(pack.id).await.unwrap().is_none());
        assert!(matches!(
            get_pack(&store, owner, pack.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_packs_newest_first_and_scoped() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let older = create(&store, owner, 3).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = create(&store, owner, 3).await.unwrap();
        create(&store, Uuid::new_v4(), 3).await.unwrap();

        let listed = list_packs(&store, owner).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }
}
