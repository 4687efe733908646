use sea_orm::{EntityTrait, PaginatorTrait};

use studio::entity::about::{self, PROFILE_ID};
use studio::entity::{project, social};

use crate::common::{TestApp, routes};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

async fn stored_profile(app: &TestApp) -> Option<about::Model> {
    about::Entity::find_by_id(PROFILE_ID)
        .one(&app.db)
        .await
        .unwrap()
}

mod projects {
    use super::*;

    #[tokio::test]
    async fn created_project_appears_on_home_and_detail_pages() {
        let app = TestApp::spawn().await;
        app.login().await;

        let id = app.create_project("Orbital Compiler").await;

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("PROJECT_DEPLOYED: Archive entry created."));

        let home = app.get(routes::HOME).await;
        assert!(home.text.contains("Orbital Compiler"));
        assert!(home.text.contains("col-span-2"));
        assert!(!home.text.contains("No projects archived yet."));

        let detail = app.get(&routes::project(id)).await;
        assert_eq!(detail.status, 200);
        assert!(detail.text.contains("Built for the archive."));
    }

    #[tokio::test]
    async fn span_defaults_when_left_blank() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(
            routes::ADMIN,
            &[("title", "Plain"), ("tag", "Web"), ("desc", "d"), ("span", "")],
            &[],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = project::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].span, project::DEFAULT_SPAN);
        assert_eq!(stored[0].live_link, None);
    }

    #[tokio::test]
    async fn missing_description_is_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(routes::ADMIN, &[("title", "No desc"), ("tag", "x")], &[])
            .await
            .assert_redirect(routes::ADMIN);

        let count = project::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 0);
        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("VALIDATION_ERROR: Required fields are missing."));
    }

    #[tokio::test]
    async fn deleting_twice_is_harmless() {
        let app = TestApp::spawn().await;
        app.login().await;
        let id = app.create_project("Short lived").await;
        app.get(routes::ADMIN).await;

        app.get(&routes::delete_project(id))
            .await
            .assert_redirect(routes::ADMIN);
        let first = app.get(routes::ADMIN).await;
        assert!(first.text.contains("PROJECT_REMOVED"));

        app.get(&routes::delete_project(id))
            .await
            .assert_redirect(routes::ADMIN);
        let second = app.get(routes::ADMIN).await;
        assert_eq!(second.status, 200);
        assert!(!second.text.contains("PROJECT_REMOVED"));

        assert_eq!(app.get(&routes::project(id)).await.status, 404);
    }

    #[tokio::test]
    async fn deleting_unparsable_ids_is_a_noop() {
        let app = TestApp::spawn().await;
        app.login().await;
        app.create_project("Survivor").await;
        app.get(routes::ADMIN).await;

        for path in ["/project/delete/abc", "/project/delete/99999999999"] {
            app.get(path).await.assert_redirect(routes::ADMIN);
        }

        let count = project::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 1);
        let dashboard = app.get(routes::ADMIN).await;
        assert!(!dashboard.text.contains("PROJECT_REMOVED"));
    }

    #[tokio::test]
    async fn delete_requires_a_session() {
        let app = TestApp::spawn().await;
        app.login().await;
        let id = app.create_project("Protected").await;
        app.get(routes::LOGOUT).await;

        app.get(&routes::delete_project(id))
            .await
            .assert_redirect(routes::LOGIN);

        let count = project::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn submissions_require_a_session() {
        let app = TestApp::spawn().await;

        app.post_multipart(routes::ADMIN, &[("title", "t"), ("tag", "x"), ("desc", "d")], &[])
            .await
            .assert_redirect(routes::LOGIN);

        let count = project::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 0);
    }
}

mod socials {
    use super::*;

    #[tokio::test]
    async fn social_link_can_be_added_and_removed() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(
            routes::ADMIN,
            &[("platform", "GitHub"), ("url", "https://github.com/atom")],
            &[],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("LINK_ESTABLISHED: Social channel secured."));
        let home = app.get(routes::HOME).await;
        assert!(home.text.contains("https://github.com/atom"));

        let link = social::Entity::find().one(&app.db).await.unwrap().unwrap();
        app.get(&routes::delete_social(link.id))
            .await
            .assert_redirect(routes::ADMIN);

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("LINK_TERMINATED: Social connection severed."));
        let count = social::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn deleting_a_missing_link_is_a_noop() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.get(&routes::delete_social(4242))
            .await
            .assert_redirect(routes::ADMIN);
        app.get("/social/delete/not-a-number")
            .await
            .assert_redirect(routes::ADMIN);

        let dashboard = app.get(routes::ADMIN).await;
        assert_eq!(dashboard.status, 200);
        assert!(!dashboard.text.contains("LINK_TERMINATED"));
    }

    #[tokio::test]
    async fn unknown_form_is_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(routes::ADMIN, &[("something", "else")], &[])
            .await
            .assert_redirect(routes::ADMIN);

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("VALIDATION_ERROR: Required fields are missing."));
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn first_save_creates_the_profile() {
        let app = TestApp::spawn().await;
        app.login().await;
        assert!(stored_profile(&app).await.is_none());

        app.post_multipart(
            routes::ADMIN,
            &[
                ("update_about", "1"),
                ("full_name", "Ada Atom"),
                ("stack_list", "Rust, Go"),
                ("bio_content", "Builds things."),
                ("completed", "3"),
                ("progress", ""),
                ("hosted", "1"),
            ],
            &[],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = stored_profile(&app).await.expect("profile row");
        assert_eq!(stored.full_name, "Ada Atom");
        assert_eq!(stored.stack_list.as_deref(), Some("Rust, Go"));
        assert_eq!((stored.completed, stored.progress, stored.hosted), (3, 0, 1));

        let about = app.get(routes::ABOUT).await;
        assert!(about.text.contains("Ada Atom"));
        assert!(about.text.contains("<li>Go</li>"));
    }

    #[tokio::test]
    async fn allowed_image_is_stored_and_recorded() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(
            routes::ADMIN,
            &[("update_about", "1")],
            &[("profile_file", "photo.png", PNG)],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = stored_profile(&app).await.expect("profile row");
        assert_eq!(stored.profile_img.as_deref(), Some("/static/uploads/photo.png"));
        assert_eq!(stored.full_name, "Atom De Legend");
        assert!(app.static_dir.join("uploads/photo.png").exists());

        let served = app.get("/static/uploads/photo.png").await;
        assert_eq!(served.status, 200);

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("SYSTEM_SYNC: Calibration data secured."));
    }

    #[tokio::test]
    async fn disallowed_image_keeps_the_previous_one() {
        let app = TestApp::spawn().await;
        app.login().await;
        app.post_multipart(
            routes::ADMIN,
            &[("update_about", "1")],
            &[("profile_file", "photo.png", PNG)],
        )
        .await;
        app.get(routes::ADMIN).await;

        app.post_multipart(
            routes::ADMIN,
            &[("update_about", "1"), ("full_name", "Renamed")],
            &[("profile_file", "photo.exe", b"MZ")],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = stored_profile(&app).await.expect("profile row");
        assert_eq!(stored.profile_img.as_deref(), Some("/static/uploads/photo.png"));
        assert_eq!(stored.full_name, "Renamed");
        assert!(!app.static_dir.join("uploads/photo.exe").exists());

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("UPLOAD_REJECTED"));
    }

    #[tokio::test]
    async fn overlong_filename_is_shortened_and_the_form_saved() {
        let app = TestApp::spawn().await;
        app.login().await;
        let long_name = format!("{}.png", "a".repeat(300));

        app.post_multipart(
            routes::ADMIN,
            &[("update_about", "1"), ("full_name", "Kept"), ("completed", "2")],
            &[("profile_file", long_name.as_str(), PNG)],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = stored_profile(&app).await.expect("profile row");
        let short_name = format!("{}.png", "a".repeat(196));
        assert_eq!(stored.full_name, "Kept");
        assert_eq!(stored.completed, 2);
        assert_eq!(
            stored.profile_img,
            Some(format!("/static/uploads/{short_name}"))
        );
        assert!(app.static_dir.join("uploads").join(&short_name).exists());

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("SYSTEM_SYNC: Calibration data secured."));
    }

    #[tokio::test]
    async fn logo_upload_sets_the_logo() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(
            routes::ADMIN,
            &[("update_about", "1")],
            &[("logo_file", "mark.webp", b"RIFF")],
        )
        .await
        .assert_redirect(routes::ADMIN);

        let stored = stored_profile(&app).await.expect("profile row");
        assert_eq!(stored.logo_url.as_deref(), Some("/static/uploads/mark.webp"));
        assert_eq!(stored.profile_img, None);
    }

    #[tokio::test]
    async fn invalid_counter_saves_nothing() {
        let app = TestApp::spawn().await;
        app.login().await;

        app.post_multipart(
            routes::ADMIN,
            &[
                ("update_about", "1"),
                ("full_name", "Should Not Stick"),
                ("completed", "lots"),
            ],
            &[("profile_file", "photo.png", PNG)],
        )
        .await
        .assert_redirect(routes::ADMIN);

        assert!(stored_profile(&app).await.is_none());
        assert!(!app.static_dir.join("uploads/photo.png").exists());

        let dashboard = app.get(routes::ADMIN).await;
        assert!(dashboard.text.contains("VALIDATION_ERROR: Project counters must be whole numbers."));
    }
}
