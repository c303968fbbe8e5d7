//! Signal extraction shared by the dimension rules: website address shape, channel
//! categories, brand tokens and audience wording.

const SOCIAL_HOSTS: &[&str] = &[
    "facebook.com",
    "fb.com",
    "instagram.com",
    "linkedin.com",
    "twitter.com",
    "x.com",
    "tiktok.com",
    "youtube.com",
    "pinterest.com",
    "linktr.ee",
    "yelp.com",
];

const BUILDER_HOSTS: &[&str] = &[
    "wixsite.com",
    "wordpress.com",
    "blogspot.com",
    "squarespace.com",
    "weebly.com",
    "godaddysites.com",
    "square.site",
    "webflow.io",
    "github.io",
    "carrd.co",
    "business.site",
    "myshopify.com",
];

pub(crate) const CONTENT_KEYWORDS: &[&str] = &[
    "content",
    "blog",
    "video",
    "youtube",
    "podcast",
    "newsletter",
    "article",
    "webinar",
];

pub(crate) const SEARCH_KEYWORDS: &[&str] = &["seo", "search", "google"];

pub(crate) const ENGAGEMENT_KEYWORDS: &[&str] = &[
    "email",
    "newsletter",
    "sms",
    "text",
    "review",
    "loyalty",
    "community",
    "event",
    "referral",
    "word of mouth",
    "webinar",
];

const BROAD_AUDIENCE_PHRASES: &[&str] = &[
    "everyone",
    "everybody",
    "anyone",
    "anybody",
    "general public",
    "all ages",
    "all people",
    "all customers",
];

const AUDIENCE_STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "who", "are", "our", "all", "any", "that", "from", "into",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scheme {
    Https,
    Http,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SiteTraits {
    pub scheme: Scheme,
    pub host: String,
    pub custom_domain: bool,
}

impl SiteTraits {
    /// Leading host label of a custom domain, reduced to ASCII alphanumerics.
    pub fn brand_label(&self) -> Option<String> {
        if !self.custom_domain {
            return None;
        }
        self.host
            .split('.')
            .next()
            .map(normalize_token)
            .filter(|label| !label.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WebsiteSignal {
    Absent,
    Malformed,
    SocialPage,
    Site(SiteTraits),
}

impl WebsiteSignal {
    pub fn site(&self) -> Option<&SiteTraits> {
        match self {
            WebsiteSignal::Site(traits) => Some(traits),
            _ => None,
        }
    }
}

pub(crate) fn classify_website(raw: Option<&str>) -> WebsiteSignal {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return WebsiteSignal::Absent;
    };

    let lowered = raw.to_ascii_lowercase();
    let (scheme, remainder) = if let Some(rest) = lowered.strip_prefix("https://") {
        (Scheme::Https, rest)
    } else if let Some(rest) = lowered.strip_prefix("http://") {
        (Scheme::Http, rest)
    } else if lowered.contains("://") {
        return WebsiteSignal::Malformed;
    } else {
        (Scheme::Missing, lowered.as_str())
    };

    let authority = remainder
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    if !is_valid_host(host) {
        return WebsiteSignal::Malformed;
    }

    if matches_any_domain(host, SOCIAL_HOSTS) {
        return WebsiteSignal::SocialPage;
    }

    WebsiteSignal::Site(SiteTraits {
        scheme,
        host: host.to_string(),
        custom_domain: !matches_any_domain(host, BUILDER_HOSTS),
    })
}

fn is_valid_host(host: &str) -> bool {
    if host.is_empty() || !host.contains('.') {
        return false;
    }

    let labels: Vec<&str> = host.split('.').collect();
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    labels_ok && tld_ok
}

fn matches_any_domain(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

/// Number of channels whose wording matches at least one keyword.
pub(crate) fn count_channels(channels: &[String], keywords: &[&str]) -> usize {
    channels
        .iter()
        .filter(|channel| channel_matches(channel, keywords))
        .count()
}

fn channel_matches(channel: &str, keywords: &[&str]) -> bool {
    let lowered = channel.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    keywords.iter().any(|keyword| {
        if keyword.contains(' ') {
            lowered.contains(keyword)
        } else {
            words.iter().any(|word| word.starts_with(keyword))
        }
    })
}

pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Two identity tokens refer to the same brand when they share a common prefix of at
/// least six characters, or the whole of the shorter token.
pub(crate) fn tokens_related(left: &str, right: &str) -> bool {
    let shorter = left.len().min(right.len());
    if shorter == 0 {
        return false;
    }
    let shared = left
        .bytes()
        .zip(right.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    shared >= shorter.min(6)
}

/// Size of the largest group of tokens related to a single anchor token.
pub(crate) fn largest_related_group(tokens: &[String]) -> usize {
    tokens
        .iter()
        .map(|anchor| {
            tokens
                .iter()
                .filter(|other| tokens_related(anchor, other))
                .count()
        })
        .max()
        .unwrap_or(0)
}

pub(crate) struct AudienceWording {
    pub meaningful_words: usize,
    pub has_number: bool,
    pub broad: bool,
}

pub(crate) fn describe_audience(description: &str) -> AudienceWording {
    let lowered = description.to_lowercase();
    let meaningful_words = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= 3 && !AUDIENCE_STOPWORDS.contains(word))
        .count();
    let has_number = lowered.chars().any(|c| c.is_ascii_digit());
    let broad = BROAD_AUDIENCE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase));

    AudienceWording {
        meaningful_words,
        has_number,
        broad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_scheme_and_custom_domain() {
        let signal = classify_website(Some("https://www.TechStart-Solutions.com/about"));
        let site = signal.site().expect("valid site");
        assert_eq!(site.scheme, Scheme::Https);
        assert_eq!(site.host, "techstart-solutions.com");
        assert!(site.custom_domain);
        assert_eq!(site.brand_label().as_deref(), Some("techstartsolutions"));
    }

    #[test]
    fn builder_subdomain_is_not_custom() {
        let signal = classify_website(Some("bellasboutique.wixsite.com/shop"));
        let site = signal.site().expect("valid site");
        assert_eq!(site.scheme, Scheme::Missing);
        assert!(!site.custom_domain);
        assert!(site.brand_label().is_none());
    }

    #[test]
    fn social_profiles_and_garbage_are_distinguished() {
        assert_eq!(
            classify_website(Some("https://facebook.com/joespizza")),
            WebsiteSignal::SocialPage
        );
        assert_eq!(classify_website(Some("joes pizza")), WebsiteSignal::Malformed);
        assert_eq!(classify_website(Some("ftp://files.example.com")), WebsiteSignal::Malformed);
        assert_eq!(classify_website(Some("localhost")), WebsiteSignal::Malformed);
        assert_eq!(classify_website(Some("   ")), WebsiteSignal::Absent);
        assert_eq!(classify_website(None), WebsiteSignal::Absent);
    }

    #[test]
    fn channel_matching_uses_word_prefixes() {
        let channels = vec![
            "Email Marketing".to_string(),
            "Referrals".to_string(),
            "Content Marketing".to_string(),
            "Word of mouth".to_string(),
        ];
        assert_eq!(count_channels(&channels, ENGAGEMENT_KEYWORDS), 3);
        assert_eq!(count_channels(&channels, CONTENT_KEYWORDS), 1);
        assert_eq!(count_channels(&channels, SEARCH_KEYWORDS), 0);
    }

    #[test]
    fn related_tokens_share_a_prefix() {
        assert!(tokens_related("northwindco", "northwindconsulting"));
        assert!(!tokens_related("nwcadvisory", "northwindconsulting"));
        assert!(tokens_related("abc", "abc"));
        assert!(!tokens_related("", "abc"));
    }

    #[test]
    fn audience_wording_detects_breadth_and_numbers() {
        let wording = describe_audience("Women aged 25-45 interested in affordable fashion");
        assert_eq!(wording.meaningful_words, 5);
        assert!(wording.has_number);
        assert!(!wording.broad);

        assert!(describe_audience("Everyone in town").broad);
    }
}
