//! Identifiers of the standard Maltego entity types.
//!
//! Only the ids are kept here; entity-type definitions live in the client.

#![allow(missing_docs)]

pub const ALIAS: &str = "maltego.Alias";
pub const AS_NUMBER: &str = "maltego.AS";
pub const BUILTWITH_TECHNOLOGY: &str = "maltego.BuiltWithTechnology";
pub const BUILTWITH_RELATIONSHIP: &str = "maltego.BuiltWithRelationship";
pub const CIRCULAR_AREA: &str = "maltego.CircularArea";
pub const COMPANY: &str = "maltego.Company";
pub const DEVICE: &str = "maltego.Device";
pub const DNS_NAME: &str = "maltego.DNSName";
pub const DOCUMENT: &str = "maltego.Document";
pub const DOMAIN: &str = "maltego.Domain";
pub const EMAIL_ADDRESS: &str = "maltego.EmailAddress";
pub const FLICKR_AFFILIATION: &str = "maltego.AffiliationFlickr";
pub const GPS: &str = "maltego.GPS";
pub const HASH: &str = "maltego.Hash";
pub const HASHTAG: &str = "maltego.Hashtag";
pub const IMAGE: &str = "maltego.Image";
pub const IPV4_ADDRESS: &str = "maltego.IPv4Address";
pub const LOCATION: &str = "maltego.Location";
pub const MX_RECORD: &str = "maltego.MXRecord";
pub const MYSPACE_AFFILIATION: &str = "maltego.AffiliationMyspace";
pub const NAMECHK: &str = "maltego.Namechk";
pub const NETBLOCK: &str = "maltego.Netblock";
pub const NS_RECORD: &str = "maltego.NSRecord";
pub const ORGANIZATION: &str = "maltego.Organization";
pub const PERSON: &str = "maltego.Person";
pub const PHONE_NUMBER: &str = "maltego.PhoneNumber";
pub const PHRASE: &str = "maltego.Phrase";
pub const PORT: &str = "maltego.Port";
pub const SENTIMENT: &str = "maltego.Sentiment";
pub const STOCK_SYMBOL: &str = "maltego.StockSymbol";
pub const TWEET: &str = "maltego.Twit";
pub const TWITTER_AFFILIATION: &str = "maltego.AffiliationTwitter";
pub const TWITTER_USER_LIST: &str = "maltego.TwitterUserList";
pub const UNIQUE_IDENTIFIER: &str = "maltego.UniqueIdentifier";
pub const URL: &str = "maltego.URL";
pub const WEBSITE: &str = "maltego.Website";
pub const WEB_TITLE: &str = "maltego.WebTitle";
