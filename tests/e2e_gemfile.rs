//! RubyGems (Gemfile) E2E tests

mod helper;

use tower::Service;
use tower_lsp::LspService;

use helper::{
    MockRegistry, create_did_open_notification, create_initialize_request,
    create_initialized_notification, offline_changelog, registries_with,
    spawn_notification_collector, wait_for_diagnostics,
};
use version_lens::lsp::backend::Backend;
use version_lens::parser::types::RegistryType;

#[tokio::test(flavor = "multi_thread")]
async fn annotates_constrained_gems_only() {
    let registry = MockRegistry::new(RegistryType::RubyGems)
        .with_latest("rails", "7.1.3")
        .with_latest("puma", "6.4.2")
        .with_latest("rack", "3.0.8");
    let calls = registry.calls();

    let (mut service, socket) = LspService::build(|client| {
        Backend::build(client, registries_with(registry), offline_changelog())
    })
    .finish();

    let mut notification_rx = spawn_notification_collector(socket);

    service.call(create_initialize_request(1)).await.unwrap();
    service
        .call(create_initialized_notification())
        .await
        .unwrap();

    let gemfile = r#"source 'https://rubygems.org'

gem 'rails', '~> 7.0.0'
gem 'puma'
# gem 'rack', '2.2.8'
"#;

    service
        .call(create_did_open_notification("file:///test/Gemfile", gemfile))
        .await
        .unwrap();

    let params = wait_for_diagnostics(&mut notification_rx).await;
    assert_eq!(params.diagnostics.len(), 1);
    assert_eq!(params.diagnostics[0].range.start.line, 2);
    assert_eq!(
        params.diagnostics[0].message,
        "Update available: 7.0.0 -> 7.1.3"
    );

    // Unconstrained and commented-out gems are never looked up
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}
