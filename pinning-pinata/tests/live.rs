//! Tests against the real Pinata service.
//!
//! Run with `PINATA_API_KEY` and `PINATA_API_SECRET` set:
//! `cargo test -p pinning-pinata --test live -- --ignored`

use pinning_core::{ContentOpts, PinningError, Provider};
use pinning_pinata::PinataProvider;

const TEST_CONTENT: &[u8] = b"hello from pinning-rs\n";

fn credentials() -> Option<(String, String)> {
    let key = std::env::var("PINATA_API_KEY").ok()?;
    let secret = std::env::var("PINATA_API_SECRET").ok()?;
    if key.is_empty() || secret.is_empty() {
        return None;
    }
    Some((key, secret))
}

#[tokio::test]
#[ignore = "requires Pinata credentials"]
async fn live_rejects_bad_credentials() {
    let Some((key, secret)) = credentials() else {
        return;
    };

    for (key, secret) in [
        (String::new(), secret.clone()),
        (key.clone(), String::new()),
        (String::new(), String::new()),
        (key.clone(), format!("{secret}!")),
    ] {
        let err = PinataProvider::new(key, secret).await.unwrap_err();
        assert!(matches!(err, PinningError::Authentication(_)), "{err:?}");
    }
}

#[tokio::test]
#[ignore = "requires Pinata credentials"]
async fn live_round_trip() {
    let Some((key, secret)) = credentials() else {
        return;
    };
    let provider = PinataProvider::new(key, secret).await.unwrap();

    let hash = provider
        .pin_content("pinning-rs test", Some(Box::new(TEST_CONTENT)), None)
        .await
        .unwrap();

    let item = provider.item_stats(&hash).await.unwrap();
    assert_eq!(item.hash, hash);
    assert_eq!(item.size, TEST_CONTENT.len() as u64);

    let listed = provider.list().await.unwrap();
    assert!(listed.iter().any(|i| i.hash == hash));

    let stats = provider.service_stats().await.unwrap();
    assert!(stats.items >= 1);

    provider.unpin(&hash).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Pinata credentials"]
async fn live_pin_in_directory() {
    let Some((key, secret)) = credentials() else {
        return;
    };
    let provider: Box<dyn Provider> = Box::new(PinataProvider::new(key, secret).await.unwrap());

    let plain = provider
        .pin_content("testfile", Some(Box::new(TEST_CONTENT)), None)
        .await
        .unwrap();
    let wrapped = provider
        .pin_content("testfile", Some(Box::new(TEST_CONTENT)), Some(&ContentOpts::in_directory()))
        .await
        .unwrap();
    assert_ne!(plain, wrapped);

    provider.unpin(&plain).await.unwrap();
    provider.unpin(&wrapped).await.unwrap();
}
