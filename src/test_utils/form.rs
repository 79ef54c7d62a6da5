use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Assert that `element` has `attribute` set to `want`, e.g. `hx-post="/api/month"`.
#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, want: &str, attribute: &str) {
    let got = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, want,
        "want element with attribute {attribute}=\"{want}\", got {got:?}"
    );
}

/// Assert that `form` has a required input called `name` of type `type_`.
///
/// If `value` is given, the input must also be prefilled with it.
#[track_caller]
pub(crate) fn assert_form_input(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: Option<&str>,
) {
    let input = form
        .select(&Selector::parse("input").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );

    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );

    if let Some(value) = value {
        let input_value = input.value().attr("value").unwrap_or_default();
        assert_eq!(
            input_value, value,
            "want input with value \"{value}\", got {input_value:?}"
        );
    }
}
