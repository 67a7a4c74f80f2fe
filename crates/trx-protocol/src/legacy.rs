//! Legacy (v2) to current (v3) property-name translation.
//!
//! Older clients and entity definitions still send v2 property names. The
//! decoder keeps the old key and also writes the value under the new name,
//! selected by the input entity's genealogy.

/// `(entity type, [(v2 name, v3 name)])`
const ENTITY_PROPERTY_MAP: &[(&str, &[(&str, &str)])] = &[
    (
        "maltego.Person",
        &[("firstname", "person.firstnames"), ("lastname", "person.lastname")],
    ),
    ("maltego.Domain", &[("whois", "whois-info")]),
    ("maltego.IPv4Address", &[("whois", "whois-info")]),
    (
        "maltego.URL",
        &[
            ("maltego.v2.value.property", "short-title"),
            ("theurl", "url"),
            ("fulltitle", "title"),
        ],
    ),
    (
        "maltego.Document",
        &[
            ("maltego.v2.value.property", "title"),
            ("link", "url"),
            ("metainfo", "document.meta-data"),
        ],
    ),
    (
        "maltego.Location",
        &[
            ("area", "location.area"),
            ("countrysc", "url"),
            ("long", "longitude"),
            ("lat", "latitude"),
        ],
    ),
    (
        "maltego.PhoneNumber",
        &[
            ("countrycode", "phonenumber.countrycode"),
            ("citycode", "phonenumber.citycode"),
            ("areacode", "phonenumber.areacode"),
            ("lastnumbers", "phonenumber.lastnumbers"),
        ],
    ),
    (
        "maltego.affiliation.Spock",
        &[
            ("network", "affiliation.network"),
            ("uid", "affiliation.uid"),
            ("profile_url", "affiliation.profile-url"),
            ("spock_websites", "spock.websites"),
        ],
    ),
    (
        "maltego.affiliation",
        &[
            ("network", "affiliation.network"),
            ("uid", "affiliation.uid"),
            ("profile_url", "affiliation.profile-url"),
        ],
    ),
    (
        "maltego.Service",
        &[("banner", "banner.text"), ("port", "port.number")],
    ),
    ("maltego.Alias", &[("properties.alias", "alias")]),
    ("maltego.Device", &[("properties.device", "device")]),
    ("maltego.GPS", &[("properties.gps", "gps.coordinate")]),
    ("maltego.CircularArea", &[("area", "radius")]),
    (
        "maltego.Image",
        &[("properties.image", "description"), ("fullImage", "url")],
    ),
    (
        "maltego.NominatimLocation",
        &[("properties.nominatimlocation", "nominatimlocation")],
    ),
    (
        "maltego.BuiltWithTechnology",
        &[("properties.builtwithtechnology", "builtwith.technology")],
    ),
    (
        "maltego.FacebookObject",
        &[("properties.facebookobject", "facebook.object")],
    ),
];

/// All `(v2 name, v3 name)` pairs for an entity type
pub fn legacy_properties(entity_type: &str) -> &'static [(&'static str, &'static str)] {
    ENTITY_PROPERTY_MAP
        .iter()
        .find(|(ty, _)| *ty == entity_type)
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}

/// Map a v2 property name to its v3 name for the given entity type.
///
/// # Examples
///
/// ```
/// use trx_protocol::translate_legacy_property_name;
///
/// assert_eq!(translate_legacy_property_name("maltego.Domain", "whois"), Some("whois-info"));
/// assert_eq!(translate_legacy_property_name("maltego.Domain", "fqdn"), None);
/// ```
pub fn translate_legacy_property_name(
    entity_type: &str,
    v2_property: &str,
) -> Option<&'static str> {
    legacy_properties(entity_type)
        .iter()
        .find(|(old, _)| *old == v2_property)
        .map(|(_, new)| *new)
}
