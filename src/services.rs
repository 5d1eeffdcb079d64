//! Grammars for the built-in services.
//!
//! Length bounds follow each service's own handle limits.

use crate::decoder::{Alphabet, Grammar, HostRule, Shape, Source};
use crate::Service;

// Facebook Profile/Page: https://www.facebook.com/<[A-Za-z0-9.]{5,50}>
// Facebook Profile:      https://www.facebook.com/profile.php?id=<[0-9]{1,20}>
pub fn facebook() -> Grammar {
    Grammar::new(Service::Facebook)
        .host(HostRule::Exact("facebook.com"))
        .host(HostRule::Exact("www.facebook.com"))
        .host(HostRule::Exact("web.facebook.com"))
        .host(HostRule::Exact("m.facebook.com"))
        .host(HostRule::Exact("fb.me"))
        .shape(Shape::new(
            "Profile",
            Source::Query {
                path: "/profile.php",
                param: "id",
            },
            "profileID",
            1..=20,
            Alphabet::digits(),
        ))
        // Could be a page as well.
        .shape(Shape::path("Profile", "/", "username", 5..=50, Alphabet::alphanumeric(".")))
}

// GitHub User/Organization: https://github.com/<[A-Za-z0-9-]{1,39}>
// GitHub Pages:             https://<user>.github.io
pub fn github() -> Grammar {
    let handle = Alphabet::alphanumeric("-");
    Grammar::new(Service::GitHub)
        .host(HostRule::Exact("github.com"))
        .host(HostRule::Exact("www.github.com"))
        .host(HostRule::Subdomain("github.io"))
        .shape(Shape::path("User", "/", "username", 1..=39, handle))
        .shape(Shape::new("User", Source::Subdomain, "username", 1..=39, handle))
}

// Instagram Profile: https://www.instagram.com/<[A-Za-z0-9._]{1,30}>
pub fn instagram() -> Grammar {
    Grammar::new(Service::Instagram)
        .host(HostRule::Exact("instagram.com"))
        .host(HostRule::Exact("www.instagram.com"))
        .shape(Shape::path("Profile", "/", "username", 1..=30, Alphabet::alphanumeric("._")))
}

// LinkedIn Profile: https://www.linkedin.com/in/<[A-Za-z0-9.-]{3,100}>
pub fn linkedin() -> Grammar {
    Grammar::new(Service::LinkedIn)
        .host(HostRule::Exact("linkedin.com"))
        .host(HostRule::Exact("www.linkedin.com"))
        .shape(Shape::path("Profile", "/in/", "username", 3..=100, Alphabet::alphanumeric(".-")))
}

/// Builds the grammar shared by Mastodon instances, bound to one instance's
/// host and reported as `service`.
///
/// Handles follow `[A-Za-z0-9_]{1,15}`.
///
/// ```
/// use slinky::{mastodon, Decoder, Service};
/// use url::Url;
///
/// let fosstodon = mastodon(Service::Fosstodon, "fosstodon.org");
/// let parsed = fosstodon.decode(Url::parse("https://fosstodon.org/@alice").unwrap())?;
/// assert_eq!(parsed.service(), Service::Fosstodon);
/// assert_eq!(parsed.attribute("platform"), Some("Mastodon"));
/// # Ok::<(), slinky::SlinkyError>(())
/// ```
pub fn mastodon(service: Service, host: &'static str) -> Grammar {
    let handle = Alphabet::alphanumeric("_");
    Grammar::new(service)
        .host(HostRule::Exact(host))
        .shape(Shape::path("Profile", "/@", "username", 1..=15, handle))
        .shape(Shape::path("Profile", "/users/", "username", 1..=15, handle))
        .platform("Mastodon")
}

// Messenger User: https://m.me/<[A-Za-z0-9.]{1,50}>
pub fn messenger() -> Grammar {
    Grammar::new(Service::Messenger)
        .host(HostRule::Exact("m.me"))
        .host(HostRule::Exact("www.m.me"))
        .shape(Shape::path("User", "/", "username", 1..=50, Alphabet::alphanumeric(".")))
}

// Pinterest Profile: https://www.pinterest.com/<[A-Za-z0-9._]{3,30}>
pub fn pinterest() -> Grammar {
    Grammar::new(Service::Pinterest)
        .host(HostRule::Exact("pinterest.com"))
        .host(HostRule::Exact("www.pinterest.com"))
        .shape(Shape::path("Profile", "/", "username", 3..=30, Alphabet::alphanumeric("._")))
}

// Reddit User:      https://www.reddit.com/u/<[A-Za-z0-9_-]{3,20}>
//                   https://www.reddit.com/user/<[A-Za-z0-9_-]{3,20}>
// Reddit Subreddit: https://www.reddit.com/r/<[A-Za-z0-9_]{3,21}>
pub fn reddit() -> Grammar {
    let user = Alphabet::alphanumeric("_-");
    Grammar::new(Service::Reddit)
        .host(HostRule::Exact("reddit.com"))
        .host(HostRule::Exact("www.reddit.com"))
        .host(HostRule::Exact("old.reddit.com"))
        .shape(Shape::path("User", "/u/", "username", 3..=20, user))
        .shape(Shape::path("User", "/user/", "username", 3..=20, user))
        .shape(Shape::path("Subreddit", "/r/", "username", 3..=21, Alphabet::alphanumeric("_")))
}

// Telegram Account:              https://t.me/<[A-Za-z0-9_]{5,32}>
// Telegram Account (phone number): https://t.me/+<[0-9]{1,15}>
pub fn telegram() -> Grammar {
    Grammar::new(Service::Telegram)
        .host(HostRule::Exact("t.me"))
        .host(HostRule::Exact("telegram.me"))
        .shape(
            Shape::path("Account", "/+", "phoneNumber", 1..=15, Alphabet::digits()).with_marker("+"),
        )
        .shape(Shape::path("Account", "/", "username", 5..=32, Alphabet::alphanumeric("_")))
}

// Twitch Channel: https://www.twitch.tv/<[A-Za-z0-9_]{4,25}>
pub fn twitch() -> Grammar {
    Grammar::new(Service::Twitch)
        .host(HostRule::Exact("twitch.tv"))
        .host(HostRule::Exact("www.twitch.tv"))
        .host(HostRule::Exact("m.twitch.tv"))
        .shape(Shape::path("Channel", "/", "username", 4..=25, Alphabet::alphanumeric("_")))
}

// Twitter Account: https://x.com/<[A-Za-z0-9_]{1,15}>
pub fn twitter() -> Grammar {
    Grammar::new(Service::Twitter)
        .host(HostRule::Exact("x.com"))
        .host(HostRule::Exact("www.x.com"))
        .host(HostRule::Exact("twitter.com"))
        .host(HostRule::Exact("www.twitter.com"))
        .host(HostRule::Exact("mobile.twitter.com"))
        .shape(Shape::path("Account", "/", "username", 1..=15, Alphabet::alphanumeric("_")))
}

// YouTube Channel: https://www.youtube.com/channel/<[A-Za-z0-9_-]{24}>
//                  https://www.youtube.com/@<[A-Za-z0-9_-]{1,50}>
//                  https://www.youtube.com/<[A-Za-z0-9_-]{1,50}>
pub fn youtube() -> Grammar {
    let channel = Alphabet::alphanumeric("-_");
    Grammar::new(Service::YouTube)
        .host(HostRule::Exact("youtube.com"))
        .host(HostRule::Exact("www.youtube.com"))
        .host(HostRule::Exact("m.youtube.com"))
        .shape(Shape::path("Channel", "/channel/", "channelID", 24..=24, channel))
        .shape(Shape::path("Channel", "/@", "channelID", 1..=50, channel))
        .shape(Shape::path("Channel", "/", "channelID", 1..=50, channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decoder, InvalidReason, SlinkyError};
    use url::Url;

    fn decode(grammar: &Grammar, raw: &str) -> Result<String, SlinkyError> {
        grammar
            .decode(Url::parse(raw).unwrap())
            .map(|parsed| parsed.id().to_owned())
    }

    fn is_length_error(result: Result<String, SlinkyError>) -> bool {
        matches!(
            result,
            Err(SlinkyError::InvalidUrl {
                reason: InvalidReason::Length { .. },
                ..
            })
        )
    }

    #[test]
    fn test_twitter_length_boundary() {
        let grammar = twitter();
        let max = "a".repeat(15);
        assert_eq!(decode(&grammar, &format!("https://x.com/{max}")).unwrap(), max);
        assert!(is_length_error(decode(&grammar, &format!("https://x.com/{max}a"))));
    }

    fn assert_length_boundary(grammar: &Grammar, prefix: &str, fill: char, max: usize) {
        let at_max: String = std::iter::repeat(fill).take(max).collect();
        assert_eq!(
            decode(grammar, &format!("{prefix}{at_max}")).unwrap(),
            at_max,
            "{prefix} at {max}"
        );
        assert!(
            is_length_error(decode(grammar, &format!("{prefix}{at_max}{fill}"))),
            "{prefix} over {max}"
        );
    }

    #[test]
    fn test_length_boundaries() {
        let cases = [
            (facebook(), "https://www.facebook.com/", 'a', 50),
            (facebook(), "https://www.facebook.com/profile.php?id=", '1', 20),
            (instagram(), "https://www.instagram.com/", 'a', 30),
            (linkedin(), "https://www.linkedin.com/in/", 'a', 100),
            (messenger(), "https://m.me/", 'a', 50),
            (pinterest(), "https://www.pinterest.com/", 'a', 30),
            (reddit(), "https://www.reddit.com/u/", 'a', 20),
            (reddit(), "https://www.reddit.com/user/", 'a', 20),
            (reddit(), "https://www.reddit.com/r/", 'a', 21),
            (twitch(), "https://www.twitch.tv/", 'a', 25),
            (youtube(), "https://www.youtube.com/@", 'a', 50),
            (youtube(), "https://www.youtube.com/", 'a', 50),
        ];
        for (grammar, prefix, fill, max) in cases {
            assert_length_boundary(&grammar, prefix, fill, max);
        }
    }

    #[test]
    fn test_mastodon_length_boundary() {
        let grammar = mastodon(Service::Fosstodon, "fosstodon.org");
        assert_length_boundary(&grammar, "https://fosstodon.org/@", 'a', 15);
        assert_length_boundary(&grammar, "https://fosstodon.org/users/", 'a', 15);
    }

    #[test]
    fn test_dotted_handles() {
        assert_eq!(
            decode(&linkedin(), "https://www.linkedin.com/in/jane.doe").unwrap(),
            "jane.doe"
        );
        assert_eq!(
            decode(&pinterest(), "https://www.pinterest.com/jane.doe").unwrap(),
            "jane.doe"
        );
        assert_eq!(
            decode(&pinterest(), "https://www.pinterest.com/jane_doe").unwrap(),
            "jane_doe"
        );
    }

    #[test]
    fn test_github_length_boundary() {
        let grammar = github();
        let max = "a".repeat(39);
        let over = "a".repeat(40);
        assert_eq!(decode(&grammar, &format!("https://github.com/{max}")).unwrap(), max);
        assert!(is_length_error(decode(&grammar, &format!("https://github.com/{over}"))));
        assert_eq!(decode(&grammar, &format!("https://{max}.github.io")).unwrap(), max);
    }

    #[test]
    fn test_telegram_length_boundaries() {
        let grammar = telegram();
        assert!(is_length_error(decode(&grammar, "https://t.me/abcd")));
        assert_eq!(decode(&grammar, "https://t.me/abcde").unwrap(), "abcde");
        assert_eq!(
            decode(&grammar, "https://t.me/+123456789012345").unwrap(),
            "+123456789012345"
        );
        assert!(is_length_error(decode(&grammar, "https://t.me/+1234567890123456")));
    }

    #[test]
    fn test_telegram_phone_rejects_letters() {
        let err = decode(&telegram(), "https://t.me/+12ab").unwrap_err();
        assert_eq!(err.reason(), Some(&InvalidReason::Characters("12ab".into())));
    }

    #[test]
    fn test_reddit_shapes() {
        let grammar = reddit();
        assert_eq!(decode(&grammar, "https://reddit.com/u/some-one").unwrap(), "some-one");
        assert_eq!(decode(&grammar, "https://reddit.com/user/some_one").unwrap(), "some_one");
        assert_eq!(decode(&grammar, "https://reddit.com/r/rust").unwrap(), "rust");
        // Subreddit names do not allow hyphens.
        assert!(decode(&grammar, "https://reddit.com/r/some-sub").is_err());
        let err = decode(&grammar, "https://reddit.com/rust").unwrap_err();
        assert_eq!(err.reason(), Some(&InvalidReason::Path("/rust".into())));
    }

    #[test]
    fn test_youtube_channel_id_exact_length() {
        let grammar = youtube();
        let id = "UC_x5XG1OV2P6uZZ5FSM9Ttw";
        assert_eq!(decode(&grammar, &format!("https://www.youtube.com/channel/{id}")).unwrap(), id);
        assert!(is_length_error(decode(
            &grammar,
            "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Tt"
        )));
    }

    #[test]
    fn test_facebook_profile_id_is_numeric() {
        let grammar = facebook();
        let err = decode(&grammar, "https://facebook.com/profile.php?id=abc").unwrap_err();
        assert_eq!(err.reason(), Some(&InvalidReason::Characters("abc".into())));
        assert!(is_length_error(decode(
            &grammar,
            "https://facebook.com/profile.php?id=123456789012345678901"
        )));
    }

    #[test]
    fn test_hosts_are_service_specific() {
        let err = decode(&twitter(), "https://github.com/alice").unwrap_err();
        assert_eq!(err.reason(), Some(&InvalidReason::Host("github.com".into())));
    }

    #[test]
    fn test_specific_shapes_come_first() {
        let kinds: Vec<_> = youtube().shapes().iter().map(|shape| shape.source()).collect();
        assert_eq!(
            kinds,
            vec![Source::Path("/channel/"), Source::Path("/@"), Source::Path("/")]
        );
        assert_eq!(reddit().shapes()[2].kind(), "Subreddit");
    }

    #[test]
    fn test_mastodon_factory_binds_host() {
        let floss = mastodon(Service::FLOSSSocial, "floss.social");
        assert_eq!(decode(&floss, "https://floss.social/@alice").unwrap(), "alice");
        assert_eq!(decode(&floss, "https://floss.social/users/alice").unwrap(), "alice");
        assert!(decode(&floss, "https://fosstodon.org/@alice").is_err());
        assert!(decode(&floss, "https://floss.social/alice").is_err());
    }
}
