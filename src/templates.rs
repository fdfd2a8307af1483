use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    controller::{LISTING_URL, Mode, NEW_FORM_URL, Navigation, RegistrationController},
    dialog::Dialog,
    form::{Field, MovieForm, ValueKind},
    models::{Genre, Movie},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const DIALOG_ID: &str = "outcome-dialog";
const CLOSE_CLASS: &str = "text-gray-400 hover:text-gray-600";
const INPUT_ERROR_CLASS: &str = "mt-2 w-full rounded-md border border-red-500 px-3 py-2 focus:border-red-500 focus:outline-none focus:ring-1 focus:ring-red-500";

pub fn listing_page(movies: &[Movie]) -> String {
    page(
        "Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movies" }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href=(NEW_FORM_URL) { "Register a movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies registered yet." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn form_page(ctl: &RegistrationController) -> String {
    let mode = ctl.mode();
    let heading = match mode {
        Mode::Create => "Register a movie",
        Mode::Edit(_) => "Edit movie",
    };

    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        div class="flex items-start justify-between gap-6" {
                            h1 class="text-3xl font-bold text-gray-900" { (heading) }
                            a class="text-sm text-blue-600 hover:text-blue-800" href=(LISTING_URL) { "Back to listing" }
                        }

                        form class="mt-8 space-y-6" method="post" action=(mode.form_url()) novalidate {
                            @for field in Field::ALL {
                                (field_input(ctl.form(), field, ctl.genres()))
                            }

                            div class="flex gap-4" {
                                button class="flex-1 rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                                a class="flex-1 rounded-md border border-gray-300 px-4 py-2 text-center font-semibold text-gray-700 hover:bg-gray-100" href=(mode.form_url()) { "Clear" }
                            }
                        }
                    }
                }
            }

            @if let Some(dialog) = ctl.dialog() {
                (dialog_modal(ctl, dialog))
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href=(LISTING_URL) { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn field_input(form: &MovieForm, field: Field, genres: &[Genre]) -> Markup {
    let rule = field.rule();
    let name = field.name();
    let value = form.value(field);
    let error = form.visible_error(field);
    let class = if error.is_some() { INPUT_ERROR_CLASS } else { INPUT_CLASS };

    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) {
                (field.label())
                @if rule.required { span class="text-red-600" { " *" } }
            }
            @match (field, rule.kind) {
                (Field::Description, _) => {
                    textarea class=(class) name=(name) id=(name) rows="4" { (value) }
                }
                (_, ValueKind::Genre) => {
                    select class=(class) name=(name) id=(name) required[rule.required] {
                        option value="" selected[value.is_empty()] { "Select a genre" }
                        @for genre in genres {
                            option value=(genre.label()) selected[value == genre.label()] { (genre.label()) }
                        }
                    }
                }
                (_, ValueKind::Date) => {
                    input class=(class) type="date" name=(name) id=(name) value=(value) required[rule.required];
                }
                (_, ValueKind::Number) => {
                    input class=(class) type="number" step="any" name=(name) id=(name) value=(value)
                        min=[rule.range.map(|r| r.0.to_string())] max=[rule.range.map(|r| r.1.to_string())] required[rule.required];
                }
                (_, ValueKind::Text) => {
                    input class=(class) type="text" name=(name) id=(name) value=(value)
                        minlength=[rule.min_length] maxlength=[rule.max_length] required[rule.required];
                }
            }
            @if let Some(error) = error {
                p class="mt-2 text-xs text-red-600" { (error.to_string()) }
            }
        }
    }
}

fn dialog_modal(ctl: &RegistrationController, dialog: &Dialog) -> Markup {
    let config = &dialog.config;

    html! {
        dialog id=(DIALOG_ID) class="m-auto w-full max-w-md rounded-lg bg-white p-6 shadow-xl backdrop:bg-gray-900/50" {
            form method="dialog" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" { (config.title()) }
                    @if config.show_close_button {
                        @match ctl.close_target(None) {
                            Some(nav) => { a class=(CLOSE_CLASS) href=(nav.href()) aria-label="Close" { "×" } }
                            None => { button class=(CLOSE_CLASS) type="submit" aria-label="Close" { "×" } }
                        }
                    }
                }
                p class="mt-4 text-gray-700" { (config.description()) }
                div class="mt-6 flex justify-end gap-3" {
                    @if let Some(label) = config.cancel_button_label() {
                        (dialog_button(label, config.cancel_button_style.classes(), ctl.close_target(Some(false))))
                    }
                    (dialog_button(config.success_button_label(), config.success_button_style.classes(), ctl.close_target(Some(true))))
                }
            }
        }
        script { (PreEscaped(format!("document.getElementById('{DIALOG_ID}').showModal();"))) }
    }
}

fn dialog_button(label: &str, style: &str, target: Option<Navigation>) -> Markup {
    let class = format!("rounded-md px-4 py-2 font-semibold {style}");
    match target {
        Some(nav) => html! { a class=(class) href=(nav.href()) { (label) } },
        None => html! { button class=(class) type="submit" { (label) } },
    }
}

/// Only plain web URLs become links or images; anything else is shown as text.
fn web_url(url: &str) -> Option<&str> {
    let lower = url.trim_start().to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(url)
}

fn movie_card(movie: &Movie) -> Markup {
    let photo = movie.photo_url.as_deref().and_then(web_url);

    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-4" {
                @if let Some(photo) = photo {
                    img class="h-24 w-16 rounded object-cover" src=(photo) alt=(movie.title);
                }
                div class="flex-1" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.release_date.year()) ")" }
                    }
                    p class="mt-1 text-sm text-gray-500" {
                        (movie.genre.label()) " · " (movie.rating.to_string()) "/10"
                    }
                    @if let Some(description) = &movie.description {
                        p class="mt-2 text-gray-700" { (description) }
                    }
                    @if let Some(link) = &movie.reference_url {
                        @match web_url(link) {
                            Some(href) => {
                                a class="mt-1 block text-sm text-gray-500 hover:text-gray-700" href=(href) target="_blank" rel="noopener noreferrer" { "Reference" }
                            }
                            None => {
                                p class="mt-1 text-sm text-gray-500 break-all" { "Reference: " (link) }
                            }
                        }
                    }
                }
                @if let Some(id) = movie.id {
                    a class="text-sm text-blue-600 hover:text-blue-800" href=(Mode::Edit(id).form_url()) { "Edit" }
                }
            }
        }
    }
}
