use super::*;

#[test]
fn parse_id_accepts_uuid() {
    let id = Uuid::new_v4();
    assert_eq!(parse_id(&id.to_string()).unwrap(), id);
}

#[test]
fn parse_id_rejects_garbage_as_not_found() {
    let err = parse_id("64f1c2b7e1a2b3c4d5e6f708").unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, NOT_FOUND_MESSAGE);
}

#[test]
fn notebook_error_maps_not_found() {
    let err = notebook_error_to_api(NotebookError::NotFound(Uuid::nil()));
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[test]
fn notebook_error_maps_forbidden() {
    let err = notebook_error_to_api(NotebookError::Forbidden(Uuid::nil()));
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[test]
fn notebook_error_hides_database_detail() {
    let err = notebook_error_to_api(NotebookError::Database(sqlx::Error::PoolTimedOut));
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "internal server error");
}
