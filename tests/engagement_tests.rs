use animeka::db::Store;
use animeka::models::anime::{AgeRating, AnimeKind, AnimeStatus, NewAnime, Season};

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
        studio: "Gainax".to_string(),
        release_date: "1995-10-04".to_string(),
        episode_count: 26,
        status: AnimeStatus::Released,
        age_rating: AgeRating::Sixteen,
        season: Season::Autumn,
        kind: AnimeKind::Series,
        genres: vec!["Mecha".to_string()],
        directors: vec![],
    }
}

fn sample_anime_from(title: &str, slug: &str, release_date: &str) -> NewAnime {
    NewAnime {
        release_date: release_date.to_string(),
        ..sample_anime(title, slug)
    }
}

async fn setup_profile(store: &Store, username: &str) -> i32 {
    let user = store.register_user(username, "hunter2hunter2").await.unwrap();
    store.ensure_profile(user.id).await.unwrap().id
}

#[tokio::test]
async fn views_are_deduplicated_per_ip() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Evangelion", "evangelion")).await.unwrap();

    store.record_view(anime.id, "203.0.113.1").await.unwrap();
    store.record_view(anime.id, "203.0.113.1").await.unwrap();
    assert_eq!(store.view_count(anime.id).await.unwrap(), 1);

    store.record_view(anime.id, "203.0.113.2").await.unwrap();
    assert_eq!(store.view_count(anime.id).await.unwrap(), 2);
}

#[tokio::test]
async fn trending_orders_by_distinct_viewers() {
    let store = test_store().await;
    let hot = store.add_anime(&sample_anime("Gurren Lagann", "gurren-lagann")).await.unwrap();
    let warm = store.add_anime(&sample_anime("FLCL", "flcl")).await.unwrap();
    let cold = store.add_anime(&sample_anime("Diebuster", "diebuster")).await.unwrap();

    store.record_view(hot.id, "203.0.113.1").await.unwrap();
    store.record_view(hot.id, "203.0.113.2").await.unwrap();
    store.record_view(warm.id, "203.0.113.1").await.unwrap();

    // Unviewed titles still rank, they just sort last.
    let trending = store.trending_anime(0, 10).await.unwrap();
    assert_eq!(trending.len(), 3);
    assert_eq!(trending[0].id, hot.id);
    assert_eq!(trending[1].id, warm.id);
    assert_eq!(trending[2].id, cold.id);
}

#[tokio::test]
async fn trending_breaks_view_ties_by_comments_then_recency() {
    let store = test_store().await;
    let newer = store
        .add_anime(&sample_anime_from("Devilman Crybaby", "devilman-crybaby", "2018-01-05"))
        .await
        .unwrap();
    let older = store
        .add_anime(&sample_anime_from("Kemonozume", "kemonozume", "2006-08-05"))
        .await
        .unwrap();
    let discussed = store
        .add_anime(&sample_anime_from("Ping Pong", "ping-pong", "2014-04-11"))
        .await
        .unwrap();
    let author = store.register_user("smile", "hunter2hunter2").await.unwrap();

    // One view each keeps the first ranking factor tied.
    store.record_view(newer.id, "203.0.113.1").await.unwrap();
    store.record_view(older.id, "203.0.113.1").await.unwrap();
    store.record_view(discussed.id, "203.0.113.1").await.unwrap();

    store
        .add_comment(author.id, discussed.id, None, "The hero appears.")
        .await
        .unwrap();

    // Comments decide first, release date decides the rest.
    let trending = store.trending_anime(0, 10).await.unwrap();
    assert_eq!(trending[0].id, discussed.id);
    assert_eq!(trending[1].id, newer.id);
    assert_eq!(trending[2].id, older.id);
}

#[tokio::test]
async fn popular_orders_by_comment_count() {
    let store = test_store().await;
    let talked_about = store.add_anime(&sample_anime("Lain", "lain")).await.unwrap();
    let quiet = store.add_anime(&sample_anime("Texhnolyze", "texhnolyze")).await.unwrap();
    let author = store.register_user("iwakura", "hunter2hunter2").await.unwrap();

    store.add_comment(author.id, talked_about.id, None, "Present day.").await.unwrap();
    store.add_comment(author.id, talked_about.id, None, "Present time.").await.unwrap();
    store.add_comment(author.id, quiet.id, None, "Bleak.").await.unwrap();

    assert_eq!(store.comment_count(talked_about.id).await.unwrap(), 2);

    // Repository paging is 0-based; the first page is page 0.
    let popular = store.popular_anime(0, 10).await.unwrap();
    assert_eq!(popular[0].id, talked_about.id);
    assert_eq!(popular[1].id, quiet.id);
}

#[tokio::test]
async fn latest_commented_dedups_on_first_appearance() {
    let store = test_store().await;
    let first = store.add_anime(&sample_anime("Monster", "monster")).await.unwrap();
    let second = store.add_anime(&sample_anime("Pluto", "pluto")).await.unwrap();
    let author = store.register_user("tenma", "hunter2hunter2").await.unwrap();

    store.add_comment(author.id, first.id, None, "One").await.unwrap();
    store.add_comment(author.id, second.id, None, "Two").await.unwrap();
    store.add_comment(author.id, first.id, None, "Three").await.unwrap();

    // Each title appears once, ordered by its most recent comment.
    let latest = store.latest_commented_anime(10).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].id, first.id);
    assert_eq!(latest[1].id, second.id);
}

#[tokio::test]
async fn average_rating_reflects_all_votes() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Haibane Renmei", "haibane-renmei")).await.unwrap();

    assert_eq!(store.average_rating(anime.id).await.unwrap(), None);

    let rakka = setup_profile(&store, "rakka").await;
    let reki = setup_profile(&store, "reki").await;
    let kuu = setup_profile(&store, "kuu").await;
    store.rate_anime(rakka, anime.id, 3).await.unwrap();
    store.rate_anime(reki, anime.id, 4).await.unwrap();
    store.rate_anime(kuu, anime.id, 5).await.unwrap();

    let average = store.average_rating(anime.id).await.unwrap();
    assert_eq!(average, Some(4.0));
}

#[tokio::test]
async fn rating_again_overwrites_previous_vote() {
    let store = test_store().await;
    let anime = store.add_anime(&sample_anime("Mushishi", "mushishi")).await.unwrap();
    let profile_id = setup_profile(&store, "ginko").await;

    store.rate_anime(profile_id, anime.id, 3).await.unwrap();
    store.rate_anime(profile_id, anime.id, 9).await.unwrap();

    let rating = store.get_rating(profile_id, anime.id).await.unwrap();
    assert_eq!(rating.map(|r| r.star), Some(9));
    assert_eq!(store.average_rating(anime.id).await.unwrap(), Some(9.0));
}

#[tokio::test]
async fn random_recommendation_covers_empty_and_seeded_catalogs() {
    let store = test_store().await;
    assert!(store.recommend_random_anime().await.unwrap().is_none());

    let anime = store.add_anime(&sample_anime("Kemonozume", "kemonozume")).await.unwrap();
    let picked = store.recommend_random_anime().await.unwrap();
    assert_eq!(picked.map(|a| a.id), Some(anime.id));
}
