#![allow(missing_docs)]

pub(crate) mod finance_api;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use finance_api::{ReceivedTransaction, serve_router, spawn_finance_api};
pub(crate) use form::{
    assert_form_input_with_value, assert_form_submit_button_with_text, assert_hx_endpoint,
    assert_select_options, get_selected_option, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, text_of};
pub(crate) use http::{assert_content_type, assert_status_ok};
