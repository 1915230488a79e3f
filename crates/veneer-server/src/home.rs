//! Static "home" endpoints.

use rouille::{Request, Response};
use tracing::{debug, error, info, warn};

/// Routes `/api` requests. Returns `None` when the request is for
/// another module.
pub fn route(request: &Request) -> Option<Response> {
    if request.method() != "GET" {
        return None;
    }

    match request.url().as_str() {
        "/api" | "/api/" => {
            debug!("home endpoint called");
            info!("home endpoint called");
            warn!("home endpoint called");
            Some(Response::text("Hello!"))
        }
        "/api/error" => {
            error!("error endpoint called");
            Some(Response::text("Error"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> Request {
        Request::fake_http("GET", url, vec![], vec![])
    }

    #[test]
    fn test_home_says_hello() {
        let response = route(&get("/api/")).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_error_endpoint_still_200() {
        let response = route(&get("/api/error")).unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn test_other_paths_not_handled() {
        assert!(route(&get("/api/other")).is_none());
        assert!(route(&get("/template/")).is_none());
    }

    #[test]
    fn test_post_not_handled() {
        let request = Request::fake_http("POST", "/api/", vec![], vec![]);
        assert!(route(&request).is_none());
    }
}
