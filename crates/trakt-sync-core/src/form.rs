use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Enumeration,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// One entry of the settings form the host renders for the widget.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub name: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    pub required: bool,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [FieldOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<&'static str>,
}

fn has_no_options(options: &&'static [FieldOption]) -> bool {
    options.is_empty()
}

pub const CLIENT_ID: FormField = FormField {
    kind: FieldKind::Input,
    name: "clientId",
    label: "Client ID",
    placeholder: Some("Paste your Trakt Client ID"),
    required: true,
    options: &[],
    default_value: None,
};

pub const ACCESS_TOKEN: FormField = FormField {
    kind: FieldKind::Input,
    name: "accessToken",
    label: "Access Token",
    placeholder: Some("Paste your Trakt Access Token"),
    required: true,
    options: &[],
    default_value: None,
};

pub const MEDIA_TYPE: FormField = FormField {
    kind: FieldKind::Enumeration,
    name: "mediaType",
    label: "Media type",
    placeholder: None,
    required: false,
    options: &[
        FieldOption {
            label: "Movie",
            value: "movies",
        },
        FieldOption {
            label: "Episode",
            value: "episodes",
        },
    ],
    default_value: Some("movies"),
};

pub const TMDB_ID: FormField = FormField {
    kind: FieldKind::Input,
    name: "tmdbId",
    label: "TMDB ID",
    placeholder: Some("e.g. 27205 (change before every sync)"),
    required: true,
    options: &[],
    default_value: None,
};

pub const FORM_FIELDS: &[FormField] = &[CLIENT_ID, ACCESS_TOKEN, MEDIA_TYPE, TMDB_ID];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaType;

    #[test]
    fn enumeration_values_parse_as_media_types() {
        for option in MEDIA_TYPE.options {
            assert!(option.value.parse::<MediaType>().is_ok());
        }
        let default = MEDIA_TYPE.default_value.unwrap();
        assert_eq!(default.parse::<MediaType>().unwrap(), MediaType::default());
    }

    #[test]
    fn form_serializes_for_host() {
        let value = serde_json::to_value(FORM_FIELDS).unwrap();
        let fields = value.as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["type"], "input");
        assert_eq!(fields[0]["name"], "clientId");
        assert_eq!(fields[2]["type"], "enumeration");
        assert_eq!(fields[2]["defaultValue"], "movies");
        assert!(fields[0].get("options").is_none());
        assert!(fields[2].get("placeholder").is_none());
    }
}
