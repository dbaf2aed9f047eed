// ABOUTME: Integration tests for session-aware recipe operations
// ABOUTME: Verifies sign-in requirements, author ownership checks, and per-user favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{chef, create_identity_store, create_recipe_store, sample_draft};
use flavor_exchange::errors::ErrorCode;
use flavor_exchange::models::{AuthorRef, RecipePatch};
use flavor_exchange::services::RecipeService;
use flavor_exchange::stores::RecipeQuery;
use std::sync::Arc;

async fn seeded_service() -> RecipeService {
    let recipes = Arc::new(create_recipe_store());
    recipes.fetch_all().await.unwrap();
    RecipeService::new(recipes, Arc::new(create_identity_store()))
}

#[tokio::test]
async fn test_signed_out_operations_require_auth() {
    let service = seeded_service().await;

    let errors = [
        service.create_as_current(sample_draft()).await.unwrap_err(),
        service.update_owned("1", RecipePatch::title("Z")).await.unwrap_err(),
        service.delete_owned("1").await.unwrap_err(),
        service.toggle_favorite("1").await.unwrap_err(),
        service.my_recipes().await.unwrap_err(),
        service.favorite_recipes().await.unwrap_err(),
    ];
    for error in errors {
        assert_eq!(error.code, ErrorCode::AuthRequired);
    }
    assert_eq!(service.recipes().len().await, 6);
}

#[tokio::test]
async fn test_create_stamps_session_author() {
    let service = seeded_service().await;
    service.identity().login(chef("user9")).await.unwrap();

    let draft = sample_draft();
    assert_eq!(draft.author, AuthorRef::new("u1", "n"));
    let created = service.create_as_current(draft).await.unwrap();

    assert_eq!(created.author.id, "user9");
    assert_eq!(created.author.username, "chef-user9");
    assert_eq!(service.my_recipes().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_only_author_may_edit_or_delete() {
    let service = seeded_service().await;
    service.identity().login(chef("user2")).await.unwrap();

    let error = service
        .update_owned("1", RecipePatch::title("Mine now"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);
    assert_eq!(error.message, "You don't have permission to modify this recipe");

    let error = service.delete_owned("1").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);
    assert!(service.recipes().get_by_id("1").await.is_some());

    let updated = service
        .update_owned("2", RecipePatch::title("Pad Krapow"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Pad Krapow");
    service.delete_owned("2").await.unwrap();
    assert_eq!(service.recipes().get_by_id("2").await, None);
}

#[tokio::test]
async fn test_edit_missing_recipe_is_not_found() {
    let service = seeded_service().await;
    service.identity().login(chef("user1")).await.unwrap();

    let error = service
        .update_owned("nonexistent", RecipePatch::title("Z"))
        .await
        .unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_favorites_follow_session_identity() {
    let service = seeded_service().await;

    service.identity().login(chef("userA")).await.unwrap();
    assert!(service.toggle_favorite("3").await.unwrap());
    assert!(service.toggle_favorite("5").await.unwrap());

    service.identity().login(chef("userB")).await.unwrap();
    assert!(service.favorite_recipes().await.unwrap().is_empty());

    service.identity().login(chef("userA")).await.unwrap();
    let ids: Vec<_> = service
        .favorite_recipes()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["3".to_owned(), "5".to_owned()]);
}

#[tokio::test]
async fn test_favorite_unknown_recipe_is_not_found() {
    let service = seeded_service().await;
    service.identity().login(chef("userA")).await.unwrap();

    let error = service.toggle_favorite("999").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(service.recipes().get_favorites("userA").await.is_empty());
}

#[tokio::test]
async fn test_dangling_favorite_can_still_be_removed() {
    let service = seeded_service().await;
    service.identity().login(chef("user3")).await.unwrap();
    service.toggle_favorite("6").await.unwrap();
    service.delete_owned("6").await.unwrap();

    assert!(service.favorite_recipes().await.unwrap().is_empty());
    assert!(!service.toggle_favorite("6").await.unwrap());
    assert!(service.recipes().get_favorites("user3").await.is_empty());
}

#[tokio::test]
async fn test_browse_needs_no_session() {
    let service = seeded_service().await;
    let query = RecipeQuery::all().with_text("cookie").with_diet("Vegetarian");
    let ids: Vec<_> = service
        .browse(&query)
        .await
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["5".to_owned()]);
}
