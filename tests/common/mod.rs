// SPDX-License-Identifier: MIT

use httpmock::MockServer;
use loginid_bot::models::UserRecord;
use loginid_bot::store::DirectoryStore;

/// Raw-content path of the directory document on the mock server.
#[allow(dead_code)]
pub const RAW_PATH: &str = "/LoginID.json";

/// Contents-API path of the directory document on the mock server.
#[allow(dead_code)]
pub const API_PATH: &str = "/repos/owner/LoginSystem/contents/LoginID.json";

/// Create a store pointed at the mock server.
#[allow(dead_code)]
pub fn store_for(server: &MockServer) -> DirectoryStore {
    DirectoryStore::new(
        server.url(RAW_PATH),
        server.url(API_PATH),
        "test_github_token".to_string(),
    )
}

/// Build a test record with fixed password.
#[allow(dead_code)]
pub fn record(id: &str, username: &str, expires_at: &str, allow_offline: bool) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        username: username.to_string(),
        password: "pw".to_string(),
        expires_at: expires_at.to_string(),
        allow_offline,
    }
}
