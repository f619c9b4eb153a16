use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use htmlblog_lib::{BlogPost, DateKey, DatePart};

use super::{blocking, SharedIndex};

pub async fn by_slug(
    State(index): State<SharedIndex>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, StatusCode> {
    let post = blocking(index, move |index| index.get_by_slug(&slug))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(post))
}

pub async fn by_date(
    State(index): State<SharedIndex>,
    Path((year, month, day)): Path<(String, String, String)>,
) -> Result<Json<BlogPost>, StatusCode> {
    let key = DateKey::Parts {
        year: DatePart::Text(year),
        month: DatePart::Text(month),
        day: DatePart::Text(day),
    };
    let post = blocking(index, move |index| index.get_by_date(key))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(post))
}

pub async fn by_date_key(
    State(index): State<SharedIndex>,
    Json(key): Json<DateKey>,
) -> Result<Json<BlogPost>, StatusCode> {
    let post = blocking(index, move |index| index.get_by_date(key))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(post))
}

#[cfg(test)]
mod test {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        Json,
    };
    use htmlblog_lib::DateKey;
    use pretty_assertions::assert_eq;

    use crate::route::test_support::Fixture;

    macro_rules! s {
        ($v:literal) => {
            $v.to_string()
        };
    }

    #[tokio::test]
    async fn by_slug() {
        let fixture = Fixture::three_posts();
        let post = super::by_slug(State(fixture.index()), Path(s!("older-blog-post")))
            .await
            .unwrap();
        assert_eq!("2025-01-15", post.0.date);

        let err = super::by_slug(State(fixture.index()), Path(s!("nope")))
            .await
            .unwrap_err();
        assert_eq!(StatusCode::NOT_FOUND, err);
    }

    #[tokio::test]
    async fn by_date_path_accepts_unpadded_parts() {
        let fixture = Fixture::three_posts();
        let post = super::by_date(State(fixture.index()), Path((s!("2025"), s!("1"), s!("10"))))
            .await
            .unwrap();
        assert_eq!("Oldest Blog Post", post.0.title);

        let err = super::by_date(State(fixture.index()), Path((s!("2025"), s!("xx"), s!("10"))))
            .await
            .unwrap_err();
        assert_eq!(StatusCode::NOT_FOUND, err);
    }

    #[tokio::test]
    async fn by_date_key_body() {
        let fixture = Fixture::three_posts();
        let post = super::by_date_key(State(fixture.index()), Json(DateKey::from("2025-01-20")))
            .await
            .unwrap();
        assert_eq!("Test Blog Post", post.0.title);
    }
}
