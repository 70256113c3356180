use petfix_test_support::FixtureServer;

/// Shared secrets baked into the fixture defaults; the test caller must use
/// the same values.
pub const BEARER_TOKEN: &str = "test-secret-123";
pub const API_KEY: &str = "test-key-456";

pub async fn spawn_fixture() -> anyhow::Result<FixtureServer> {
    FixtureServer::spawn(env!("CARGO_BIN_EXE_petfix-api"), &[]).await
}
