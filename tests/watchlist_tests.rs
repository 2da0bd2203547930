use animeka::db::Store;
use animeka::models::anime::{AgeRating, AnimeKind, AnimeStatus, NewAnime, Season};
use animeka::models::watchlist::WatchCategory;

async fn test_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn sample_anime(title: &str, slug: &str) -> NewAnime {
    NewAnime {
        title: title.to_string(),
        second_title: None,
        slug: slug.to_string(),
        description: "Synopsis.".to_string(),
        poster: None,
        studio: "Bones".to_string(),
        release_date: "2006-10-05".to_string(),
        episode_count: 25,
        status: AnimeStatus::Released,
        age_rating: AgeRating::Thirteen,
        season: Season::Autumn,
        kind: AnimeKind::Series,
        genres: vec!["Drama".to_string()],
        directors: vec![],
    }
}

/// Creates a user with its profile and watch list, returning (watch_list_id, profile_id).
async fn setup_member(store: &Store, username: &str) -> (i32, i32) {
    let user = store.register_user(username, "hunter2hunter2").await.unwrap();
    let profile = store.ensure_profile(user.id).await.unwrap();
    let list = store.ensure_watch_list(profile.id).await.unwrap();
    (list.id, profile.id)
}

#[tokio::test]
async fn toggling_a_category_adds_then_removes() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Eureka Seven", "eureka-seven")).await.unwrap();
    let (list_id, profile_id) = setup_member(&store, "renton").await;

    let now_in = store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::Watching)
        .await
        .unwrap();
    assert_eq!(now_in, Some(WatchCategory::Watching));
    assert_eq!(
        store.current_watch_category(profile_id, anime.id).await.unwrap(),
        Some(WatchCategory::Watching)
    );

    // Same category again is a toggle off.
    let now_in = store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::Watching)
        .await
        .unwrap();
    assert_eq!(now_in, None);
    assert_eq!(
        store.current_watch_category(profile_id, anime.id).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn categories_are_mutually_exclusive() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Mononoke", "mononoke")).await.unwrap();
    let (list_id, profile_id) = setup_member(&store, "kusuriuri").await;

    store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::WillWatch)
        .await
        .unwrap();
    let now_in = store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::Viewed)
        .await
        .unwrap();

    assert_eq!(now_in, Some(WatchCategory::Viewed));
    assert_eq!(
        store.current_watch_category(profile_id, anime.id).await.unwrap(),
        Some(WatchCategory::Viewed)
    );

    let will_watch = store
        .list_watch_category(profile_id, WatchCategory::WillWatch)
        .await
        .unwrap();
    assert!(will_watch.is_empty());

    let viewed = store
        .list_watch_category(profile_id, WatchCategory::Viewed)
        .await
        .unwrap();
    assert_eq!(viewed.len(), 1);
    assert_eq!(viewed[0].id, anime.id);
}

#[tokio::test]
async fn favorite_is_independent_of_categories() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Kaiba", "kaiba")).await.unwrap();
    let (list_id, profile_id) = setup_member(&store, "warp").await;

    assert!(store.toggle_favorite(list_id, profile_id, anime.id).await.unwrap());
    assert!(store.is_favorite(profile_id, anime.id).await.unwrap());

    // Moving the title between categories leaves the flag alone.
    store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::Dropped)
        .await
        .unwrap();
    store
        .set_watch_category(list_id, profile_id, anime.id, WatchCategory::Dropped)
        .await
        .unwrap();
    assert!(store.is_favorite(profile_id, anime.id).await.unwrap());

    assert!(!store.toggle_favorite(list_id, profile_id, anime.id).await.unwrap());
    assert!(!store.is_favorite(profile_id, anime.id).await.unwrap());

    let favorites = store.list_favorites(profile_id).await.unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn lists_are_per_profile() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Planetes", "planetes")).await.unwrap();
    let (list_a, profile_a) = setup_member(&store, "hachimaki").await;
    let (_list_b, profile_b) = setup_member(&store, "tanabe").await;

    store
        .set_watch_category(list_a, profile_a, anime.id, WatchCategory::Viewed)
        .await
        .unwrap();

    assert_eq!(
        store.current_watch_category(profile_b, anime.id).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn ensure_profile_is_idempotent() {
    let store = test_store().await;
    let user = store.register_user("nono", "buster-machine-7").await.unwrap();

    let first = store.ensure_profile(user.id).await.unwrap();
    let second = store.ensure_profile(user.id).await.unwrap();
    assert_eq!(first.id, second.id);

    let list_a = store.ensure_watch_list(first.id).await.unwrap();
    let list_b = store.ensure_watch_list(first.id).await.unwrap();
    assert_eq!(list_a.id, list_b.id);
}
