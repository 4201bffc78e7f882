use spotfilter::types::{RemovalReport, Token};
use spotfilter::utils::*;

// Helper function to create a test token
fn create_test_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-library-read".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 digest encoded as URL-safe base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_playlist_id_from_share_url() {
    assert_eq!(
        playlist_id_from_link("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );

    // Query string and surrounding whitespace are dropped
    assert_eq!(
        playlist_id_from_link("  https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=a1b2c3\n"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );

    // Scheme-less links still carry a host
    assert_eq!(
        playlist_id_from_link("open.spotify.com/playlist/abc123"),
        Some("abc123".to_string())
    );
}

#[test]
fn test_playlist_id_from_uri() {
    assert_eq!(
        playlist_id_from_link("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
}

#[test]
fn test_playlist_id_from_invalid_links() {
    assert_eq!(playlist_id_from_link(""), None);
    assert_eq!(playlist_id_from_link("hello world"), None);
    assert_eq!(playlist_id_from_link("37i9dQZF1DXcBWIGoYBM5M"), None);
    assert_eq!(playlist_id_from_link("spotify:album:37i9dQZF1DXcBWIGoYBM5M"), None);
    assert_eq!(
        playlist_id_from_link("https://open.spotify.com/album/37i9dQZF1DXcBWIGoYBM5M"),
        None
    );
    assert_eq!(playlist_id_from_link("https://open.spotify.com/playlist/"), None);
    assert_eq!(playlist_id_from_link("spotify:playlist:"), None);
    assert_eq!(playlist_id_from_link("playlist/abc123"), None);
}

#[test]
fn test_playlist_id_from_other_hosts() {
    assert_eq!(playlist_id_from_link("https://evil.example/playlist/XYZ"), None);
    assert_eq!(playlist_id_from_link("https://open.spotify.com.evil.example/playlist/XYZ"), None);
    assert_eq!(playlist_id_from_link("https://open.spotify.com/user/x/playlist/XYZ"), None);
    assert_eq!(
        playlist_id_from_link("http://open.spotify.com/playlist/XYZ"),
        Some("XYZ".to_string())
    );
}

#[test]
fn test_playlist_id_accepts_links_and_bare_ids() {
    assert_eq!(playlist_id("spotify:playlist:abc"), Some("abc".to_string()));
    assert_eq!(playlist_id(" abc "), Some("abc".to_string()));
    assert_eq!(playlist_id("abc/../../me?x="), None);
    assert_eq!(playlist_id("https://evil.example/playlist/XYZ"), None);
    assert_eq!(playlist_id(""), None);
}

#[test]
fn test_escape_markup() {
    assert_eq!(escape_markup("Rock & Roll"), "Rock &amp; Roll");
    assert_eq!(escape_markup("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
    assert_eq!(escape_markup(r#"say "hi" 'there'"#), "say &quot;hi&quot; &#x27;there&#x27;");
    assert_eq!(escape_markup("plain"), "plain");
}

#[test]
fn test_batches_preserve_order() {
    let ids: Vec<String> = (0..250).map(|i| i.to_string()).collect();
    let batches: Vec<&[String]> = batches(&ids, 100).collect();

    assert_eq!(batches.len(), batch_count(ids.len(), 100));
    assert_eq!(
        batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
        vec![100, 100, 50]
    );
    assert_eq!(batches.concat(), ids);
}

#[test]
fn test_batch_count() {
    assert_eq!(batch_count(0, 100), 0);
    assert_eq!(batch_count(1, 100), 1);
    assert_eq!(batch_count(100, 100), 1);
    assert_eq!(batch_count(101, 100), 2);
    // a zero batch size is treated as one
    assert_eq!(batch_count(3, 0), 3);
}

#[test]
fn test_token_expiry_has_safety_margin() {
    let token = create_test_token(1_000, 3_600);

    assert!(!token.is_expired(1_000));
    assert!(!token.is_expired(4_359));
    assert!(token.is_expired(4_360));

    // short-lived tokens never underflow
    assert!(create_test_token(1_000, 60).is_expired(1_000));
}

#[test]
fn test_removal_report_messages() {
    let empty = RemovalReport::nothing_removed("Road Trip");
    assert!(empty.is_empty());
    assert_eq!(empty.to_string(), "No songs to remove from 'Road Trip'.");

    let report = RemovalReport {
        target_playlist_name: "Road Trip".to_string(),
        removed_count: 2,
        removed_track_names: vec!["One".to_string(), "Two".to_string()],
        dry_run: false,
    };
    assert_eq!(report.to_string(), "Removed 2 songs from 'Road Trip'.");
}
