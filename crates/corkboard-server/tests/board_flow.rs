mod common;

use axum::http::StatusCode;

use common::*;

#[tokio::test]
async fn full_board_lifecycle() {
    let (app, _state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;

    let json = body_json(get(&app, "/", &cookie).await).await;
    assert_eq!(json["boards"].as_array().unwrap().len(), 0);
    let token = json["csrf_token"].as_str().unwrap().to_string();

    // Create board "Work"
    let form = format!("title=Work&csrf_token={token}");
    let resp = post_form(&app, "/boards/new", &form, &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let json = body_json(get(&app, "/", &cookie).await).await;
    assert_eq!(json["boards"][0]["title"], "Work");
    let board_id = json["boards"][0]["id"].as_i64().unwrap();

    // Add list "Todo"
    let form = format!("title=Todo&csrf_token={token}");
    let resp = post_form(&app, &format!("/board/{board_id}/list/new"), &form, &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/board/{board_id}"));

    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let list_id = json["board"]["lists"][0]["id"].as_i64().unwrap();
    assert_eq!(json["board"]["lists"][0]["title"], "Todo");

    // Add card "Write spec"
    let form = format!("content=Write+spec&csrf_token={token}");
    let resp = post_form(&app, &format!("/list/{list_id}/card/new"), &form, &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/board/{board_id}"));

    // Detail shows one list holding one card
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let lists = json["board"]["lists"].as_array().unwrap();
    assert_eq!(lists.len(), 1);
    let cards = lists[0]["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["content"], "Write spec");

    // Delete the board; everything under it goes too
    let form = format!("csrf_token={token}");
    let resp = post_form(&app, &format!("/board/{board_id}/delete"), &form, &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let json = body_json(get(&app, "/", &cookie).await).await;
    assert_eq!(json["boards"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn background_board_creation_returns_json() {
    let (app, _state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    let form = format!("title=Launch&csrf_token={token}");
    let resp = post_form_with(&app, "/boards/new", &form, &cookie, true).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["board"]["title"], "Launch");
    assert_eq!(json["board"]["list_count"], 0);
    assert!(json["board"]["id"].as_i64().is_some());
}

#[tokio::test]
async fn background_board_creation_with_empty_title_is_a_400() {
    let (app, state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    let form = format!("title=&csrf_token={token}");
    let resp = post_form_with(&app, "/boards/new", &form, &cookie, true).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Board title cannot be empty.");

    assert_eq!(count(&state, "boards"), 0);
}

#[tokio::test]
async fn empty_titles_and_content_never_persist() {
    let (app, state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    // Board with empty title
    let resp = post_form(&app, "/boards/new", &format!("title=&csrf_token={token}"), &cookie).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookies = format!("{}; {}", cookie, set_cookies(&resp));
    let json = body_json(get(&app, "/", &cookies).await).await;
    assert_eq!(json["notice"]["category"], "danger");
    assert_eq!(json["notice"]["message"], "Board title cannot be empty.");
    assert_eq!(count(&state, "boards"), 0);

    // A real board to hang the list/card attempts off
    post_form(&app, "/boards/new", &format!("title=Work&csrf_token={token}"), &cookie).await;
    let json = body_json(get(&app, "/", &cookie).await).await;
    let board_id = json["boards"][0]["id"].as_i64().unwrap();

    // List with empty title
    let resp = post_form(
        &app,
        &format!("/board/{board_id}/list/new"),
        &format!("title=&csrf_token={token}"),
        &cookie,
    )
    .await;
    assert_eq!(location(&resp), format!("/board/{board_id}"));
    let cookies = format!("{}; {}", cookie, set_cookies(&resp));
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookies).await).await;
    assert_eq!(json["notice"]["message"], "List title cannot be empty.");
    assert_eq!(count(&state, "lists"), 0);

    // Card with empty content
    post_form(
        &app,
        &format!("/board/{board_id}/list/new"),
        &format!("title=Todo&csrf_token={token}"),
        &cookie,
    )
    .await;
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let list_id = json["board"]["lists"][0]["id"].as_i64().unwrap();

    let resp = post_form(
        &app,
        &format!("/list/{list_id}/card/new"),
        &format!("content=&csrf_token={token}"),
        &cookie,
    )
    .await;
    assert_eq!(location(&resp), format!("/board/{board_id}"));
    let cookies = format!("{}; {}", cookie, set_cookies(&resp));
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookies).await).await;
    assert_eq!(json["notice"]["message"], "Card content cannot be empty.");
    assert_eq!(count(&state, "cards"), 0);
}

#[tokio::test]
async fn index_orders_boards_most_recent_first_with_list_counts() {
    let (app, _state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    post_form(&app, "/boards/new", &format!("title=First&csrf_token={token}"), &cookie).await;
    post_form(&app, "/boards/new", &format!("title=Second&csrf_token={token}"), &cookie).await;

    let json = body_json(get(&app, "/", &cookie).await).await;
    let boards = json["boards"].as_array().unwrap();
    assert_eq!(boards[0]["title"], "Second");
    assert_eq!(boards[1]["title"], "First");

    let first_id = boards[1]["id"].as_i64().unwrap();
    post_form(
        &app,
        &format!("/board/{first_id}/list/new"),
        &format!("title=Todo&csrf_token={token}"),
        &cookie,
    )
    .await;

    let json = body_json(get(&app, "/", &cookie).await).await;
    assert_eq!(json["boards"][1]["list_count"], 1);
    assert_eq!(json["boards"][0]["list_count"], 0);
}

#[tokio::test]
async fn deleting_a_list_keeps_its_siblings() {
    let (app, state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    post_form(&app, "/boards/new", &format!("title=Work&csrf_token={token}"), &cookie).await;
    let json = body_json(get(&app, "/", &cookie).await).await;
    let board_id = json["boards"][0]["id"].as_i64().unwrap();

    for title in ["Todo", "Done"] {
        post_form(
            &app,
            &format!("/board/{board_id}/list/new"),
            &format!("title={title}&csrf_token={token}"),
            &cookie,
        )
        .await;
    }
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let todo_id = json["board"]["lists"][0]["id"].as_i64().unwrap();
    post_form(
        &app,
        &format!("/list/{todo_id}/card/new"),
        &format!("content=stale&csrf_token={token}"),
        &cookie,
    )
    .await;

    let resp = post_form(
        &app,
        &format!("/list/{todo_id}/delete"),
        &format!("csrf_token={token}"),
        &cookie,
    )
    .await;
    assert_eq!(location(&resp), format!("/board/{board_id}"));

    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let lists = json["board"]["lists"].as_array().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["title"], "Done");
    assert_eq!(count(&state, "cards"), 0);
}

#[tokio::test]
async fn deleting_a_card_leaves_the_list() {
    let (app, state) = test_app();
    let cookie = register_and_login(&app, "alice", "a@x.com", "pw1").await;
    let token = csrf_token(&app, "/", &cookie).await;

    post_form(&app, "/boards/new", &format!("title=Work&csrf_token={token}"), &cookie).await;
    let json = body_json(get(&app, "/", &cookie).await).await;
    let board_id = json["boards"][0]["id"].as_i64().unwrap();
    post_form(
        &app,
        &format!("/board/{board_id}/list/new"),
        &format!("title=Todo&csrf_token={token}"),
        &cookie,
    )
    .await;
    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let list_id = json["board"]["lists"][0]["id"].as_i64().unwrap();
    post_form(
        &app,
        &format!("/list/{list_id}/card/new"),
        &format!("content=done+with+this&csrf_token={token}"),
        &cookie,
    )
    .await;

    let json = body_json(get(&app, &format!("/board/{board_id}"), &cookie).await).await;
    let card_id = json["board"]["lists"][0]["cards"][0]["id"].as_i64().unwrap();

    let resp = post_form(
        &app,
        &format!("/card/{card_id}/delete"),
        &format!("csrf_token={token}"),
        &cookie,
    )
    .await;
    assert_eq!(location(&resp), format!("/board/{board_id}"));

    assert_eq!(count(&state, "lists"), 1);
    assert_eq!(count(&state, "cards"), 0);
}
