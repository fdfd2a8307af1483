use std::sync::Arc;

use crate::{
    dialog::{CloseAction, Dialog},
    form::{Field, FormValues, MovieForm},
    models::{Genre, Movie},
    service::{MovieService, ServiceError},
};

pub const LISTING_URL: &str = "/movies";
pub const NEW_FORM_URL: &str = "/movies/new";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Create,
    Edit(i64),
}

impl Mode {
    pub fn from_id(id: Option<i64>) -> Self {
        id.map_or(Mode::Create, Mode::Edit)
    }

    /// URL the form is served from and posted back to.
    pub fn form_url(self) -> String {
        match self {
            Mode::Create => NEW_FORM_URL.to_string(),
            Mode::Edit(id) => format!("/movies/{id}/edit"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Navigation {
    Listing,
    NewForm,
    /// Reopen the form in its reset state.
    Reload(Mode),
}

impl Navigation {
    pub fn href(self) -> String {
        match self {
            Navigation::Listing => LISTING_URL.to_string(),
            Navigation::NewForm => NEW_FORM_URL.to_string(),
            Navigation::Reload(mode) => mode.form_url(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Invalid(Vec<Field>),
    Created,
    Updated,
    Failed(ServiceError),
}

/// Drives one registration form: loading, validation, submission and the
/// dialog shown afterwards.
#[derive(Clone)]
pub struct RegistrationController {
    service: Arc<dyn MovieService>,
    mode: Mode,
    form: MovieForm,
    dialog: Option<Dialog>,
}

impl RegistrationController {
    /// Opens the form. With an identifier the record is fetched and loaded,
    /// otherwise the form starts blank.
    pub async fn init(
        service: Arc<dyn MovieService>,
        id: Option<i64>,
    ) -> Result<Self, ServiceError> {
        let form = match id {
            Some(id) => MovieForm::from_movie(&service.lookup(id).await?),
            None => MovieForm::blank(),
        };
        Ok(Self { service, mode: Mode::from_id(id), form, dialog: None })
    }

    /// Rebuilds the controller for a form whose values came back from the browser.
    pub fn resume(
        service: Arc<dyn MovieService>,
        mode: Mode,
        initial: FormValues,
        values: FormValues,
    ) -> Self {
        Self { service, mode, form: MovieForm::with_values(initial, values), dialog: None }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &MovieForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MovieForm {
        &mut self.form
    }

    pub fn genres(&self) -> &'static [Genre] {
        &Genre::ALL
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.form.mark_all_as_touched();

        let mut movie = match self.form.raw_value() {
            Ok(movie) => movie,
            Err(invalid) => {
                tracing::debug!(%invalid, "submit blocked");
                self.dialog = Some(Dialog::invalid_form());
                return SubmitOutcome::Invalid(invalid.0);
            }
        };

        match self.mode {
            Mode::Edit(id) => {
                movie.id = Some(id);
                self.update(movie).await
            }
            Mode::Create => self.create(movie).await,
        }
    }

    async fn create(&mut self, movie: Movie) -> SubmitOutcome {
        match self.service.create(&movie).await {
            Ok(()) => {
                tracing::info!(title = %movie.title, "movie registered");
                self.dialog = Some(Dialog::created());
                SubmitOutcome::Created
            }
            Err(err) => {
                tracing::warn!(error = %err, title = %movie.title, "create failed");
                self.dialog = Some(Dialog::create_failed());
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn update(&mut self, movie: Movie) -> SubmitOutcome {
        match self.service.update(&movie).await {
            Ok(()) => {
                tracing::info!(id = ?movie.id, "movie updated");
                self.dialog = Some(Dialog::updated());
                SubmitOutcome::Updated
            }
            Err(err) => {
                tracing::warn!(error = %err, id = ?movie.id, "update failed");
                self.dialog = Some(Dialog::update_failed());
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Closes the open dialog with the user's choice and applies its action.
    /// Returns where the caller must navigate, if anywhere.
    pub fn close_dialog(&mut self, choice: Option<bool>) -> Option<Navigation> {
        let dialog = self.dialog.take()?;
        match dialog.action_for(choice) {
            CloseAction::NavigateToListing => Some(Navigation::Listing),
            CloseAction::StartNew => {
                self.mode = Mode::Create;
                self.form = MovieForm::blank();
                Some(Navigation::NewForm)
            }
            CloseAction::ResetForm => {
                self.reset();
                Some(Navigation::Reload(self.mode))
            }
            CloseAction::Dismiss => None,
        }
    }

    /// Where closing the open dialog with `choice` would lead, leaving this
    /// controller and its dialog untouched. `None` closes the dialog in place.
    pub fn close_target(&self, choice: Option<bool>) -> Option<Navigation> {
        self.clone().close_dialog(choice)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    #[derive(Default)]
    struct RecordingService {
        stored: Mutex<HashMap<i64, Movie>>,
        created: Mutex<Vec<Movie>>,
        updated: Mutex<Vec<Movie>>,
        unavailable: bool,
    }

    impl RecordingService {
        fn with(movie: Movie) -> Self {
            let svc = Self::default();
            svc.stored.lock().unwrap().insert(movie.id.unwrap(), movie);
            svc
        }

        fn calls(&self) -> (usize, usize) {
            (self.created.lock().unwrap().len(), self.updated.lock().unwrap().len())
        }
    }

    #[async_trait::async_trait]
    impl MovieService for RecordingService {
        async fn lookup(&self, id: i64) -> Result<Movie, ServiceError> {
            self.stored.lock().unwrap().get(&id).cloned().ok_or(ServiceError::NotFound(id))
        }

        async fn create(&self, movie: &Movie) -> Result<(), ServiceError> {
            self.created.lock().unwrap().push(movie.clone());
            if self.unavailable {
                return Err(ServiceError::Network("connection refused".to_string()));
            }
            Ok(())
        }

        async fn update(&self, movie: &Movie) -> Result<(), ServiceError> {
            self.updated.lock().unwrap().push(movie.clone());
            if self.unavailable {
                return Err(ServiceError::Network("connection refused".to_string()));
            }
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Movie>, ServiceError> {
            Ok(self.stored.lock().unwrap().values().cloned().collect())
        }
    }

    fn stored_movie() -> Movie {
        Movie {
            id: Some(12),
            title: "Amélie".to_string(),
            photo_url: Some("https://img.example/amelie.jpg".to_string()),
            release_date: jiff::civil::date(2001, 4, 25),
            description: Some("Montmartre.".to_string()),
            rating: 8.3,
            reference_url: Some("https://www.imdb.com/title/tt0211915/".to_string()),
            genre: Genre::Romance,
        }
    }

    fn fill_valid(form: &mut MovieForm) {
        form.set_value(Field::Title, "Paddington 2");
        form.set_value(Field::ReleaseDate, "2017-11-10");
        form.set_value(Field::Rating, "7.8");
        form.set_value(Field::Genre, "Comedy");
    }

    async fn blank(svc: &Arc<RecordingService>) -> RegistrationController {
        RegistrationController::init(svc.clone(), None).await.unwrap()
    }

    #[tokio::test]
    async fn init_without_id_starts_blank() {
        let svc = Arc::new(RecordingService::default());
        let ctl = blank(&svc).await;

        assert_eq!(ctl.mode(), Mode::Create);
        assert_eq!(ctl.form().values(), &FormValues::default());
        assert_eq!(ctl.genres().len(), 7);
        assert!(ctl.dialog().is_none());
    }

    #[tokio::test]
    async fn init_with_unknown_id_fails() {
        let svc = Arc::new(RecordingService::default());
        let res = RegistrationController::init(svc, Some(99)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(99))));
    }

    #[tokio::test]
    async fn short_title_blocks_submit() {
        let svc = Arc::new(RecordingService::default());
        let mut ctl = blank(&svc).await;
        fill_valid(ctl.form_mut());
        ctl.form_mut().set_value(Field::Title, "A");

        let outcome = ctl.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref f) if f == &[Field::Title]));
        assert!(!ctl.form().is_valid());
        assert!(ctl.form().visible_error(Field::Title).is_some());
        assert_eq!(ctl.dialog(), Some(&Dialog::invalid_form()));
        assert_eq!(svc.calls(), (0, 0));
    }

    #[tokio::test]
    async fn out_of_range_rating_blocks_submit() {
        let svc = Arc::new(RecordingService::with(stored_movie()));
        let mut ctl = RegistrationController::init(svc.clone(), Some(12)).await.unwrap();
        ctl.form_mut().set_value(Field::Rating, "11");

        assert!(matches!(ctl.submit().await, SubmitOutcome::Invalid(_)));
        assert_eq!(svc.calls(), (0, 0));
    }

    #[tokio::test]
    async fn every_rule_violation_blocks_submit() {
        let violations = [
            (Field::Title, ""),
            (Field::Title, "x"),
            (Field::PhotoUrl, "short"),
            (Field::ReleaseDate, ""),
            (Field::Rating, ""),
            (Field::Rating, "-1"),
            (Field::ReferenceUrl, "tiny"),
            (Field::Genre, ""),
        ];

        for (field, value) in violations {
            let svc = Arc::new(RecordingService::default());
            let mut ctl = blank(&svc).await;
            fill_valid(ctl.form_mut());
            ctl.form_mut().set_value(field, value);

            assert!(matches!(ctl.submit().await, SubmitOutcome::Invalid(_)), "{field}");
            assert_eq!(svc.calls(), (0, 0), "{field}");
        }
    }

    #[tokio::test]
    async fn create_navigates_only_after_confirmation() {
        let svc = Arc::new(RecordingService::default());
        let mut ctl = blank(&svc).await;
        fill_valid(ctl.form_mut());

        assert!(matches!(ctl.submit().await, SubmitOutcome::Created));
        assert_eq!(svc.calls(), (1, 0));

        let created = svc.created.lock().unwrap()[0].clone();
        assert_eq!(created.id, None);
        assert_eq!(created.photo_url, None);
        assert_eq!(created.title, "Paddington 2");

        assert_eq!(ctl.dialog(), Some(&Dialog::created()));
        assert_eq!(ctl.close_dialog(Some(true)), Some(Navigation::Listing));
        assert!(ctl.dialog().is_none());
    }

    #[tokio::test]
    async fn create_new_after_success_resets_form() {
        let svc = Arc::new(RecordingService::default());
        let mut ctl = blank(&svc).await;
        fill_valid(ctl.form_mut());
        ctl.submit().await;

        assert_eq!(ctl.close_dialog(Some(false)), Some(Navigation::Reload(Mode::Create)));
        assert_eq!(ctl.form().values(), &FormValues::default());
        assert!(!ctl.form().is_touched(Field::Title));
    }

    #[tokio::test]
    async fn unchanged_edit_round_trips_to_update() {
        let svc = Arc::new(RecordingService::with(stored_movie()));
        let mut ctl = RegistrationController::init(svc.clone(), Some(12)).await.unwrap();

        assert!(matches!(ctl.submit().await, SubmitOutcome::Updated));
        assert_eq!(svc.calls(), (0, 1));
        assert_eq!(svc.updated.lock().unwrap()[0], stored_movie());
    }

    #[tokio::test]
    async fn edited_title_keeps_other_fields() {
        let svc = Arc::new(RecordingService::with(stored_movie()));
        let mut ctl = RegistrationController::init(svc.clone(), Some(12)).await.unwrap();
        ctl.form_mut().set_value(Field::Title, "Le Fabuleux Destin d'Amélie Poulain");

        ctl.submit().await;

        let expected =
            Movie { title: "Le Fabuleux Destin d'Amélie Poulain".to_string(), ..stored_movie() };
        assert_eq!(svc.updated.lock().unwrap().as_slice(), &[expected]);
        assert_eq!(ctl.dialog(), Some(&Dialog::updated()));
        assert_eq!(ctl.close_dialog(None), Some(Navigation::Listing));
    }

    #[tokio::test]
    async fn service_failure_keeps_form_values() {
        let svc = Arc::new(RecordingService { unavailable: true, ..Default::default() });
        let mut ctl = blank(&svc).await;
        fill_valid(ctl.form_mut());
        let before = ctl.form().values().clone();

        assert!(matches!(ctl.submit().await, SubmitOutcome::Failed(ServiceError::Network(_))));
        assert_eq!(ctl.dialog(), Some(&Dialog::create_failed()));
        assert_eq!(ctl.close_dialog(Some(true)), None);
        assert_eq!(ctl.form().values(), &before);

        assert!(matches!(ctl.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(svc.calls(), (2, 0));
    }

    #[tokio::test]
    async fn failed_update_reports_through_dialog() {
        let svc = Arc::new(RecordingService {
            unavailable: true,
            ..RecordingService::with(stored_movie())
        });
        let mut ctl = RegistrationController::init(svc.clone(), Some(12)).await.unwrap();

        assert!(matches!(ctl.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(ctl.dialog(), Some(&Dialog::update_failed()));
    }

    #[tokio::test]
    async fn reset_restores_loaded_record() {
        let svc = Arc::new(RecordingService::with(stored_movie()));
        let mut ctl = RegistrationController::init(svc, Some(12)).await.unwrap();
        let loaded = ctl.form().values().clone();

        ctl.form_mut().set_value(Field::Title, "A");
        ctl.submit().await;
        ctl.reset();

        assert_eq!(ctl.form().values(), &loaded);
        assert!(Field::ALL.iter().all(|f| !ctl.form().is_touched(*f)));
        assert!(ctl.form().is_valid());
    }

    #[tokio::test]
    async fn invalid_dialog_cancel_starts_a_new_record() {
        let svc = Arc::new(RecordingService::with(stored_movie()));
        let mut ctl = RegistrationController::init(svc, Some(12)).await.unwrap();
        ctl.form_mut().set_value(Field::Genre, "");
        ctl.submit().await;

        assert_eq!(ctl.close_dialog(Some(false)), Some(Navigation::NewForm));
        assert_eq!(ctl.mode(), Mode::Create);
        assert_eq!(ctl.form().values(), &FormValues::default());
    }

    #[tokio::test]
    async fn close_target_previews_without_closing() {
        let svc = Arc::new(RecordingService::default());
        let mut ctl = blank(&svc).await;
        fill_valid(ctl.form_mut());
        ctl.submit().await;

        assert_eq!(ctl.close_target(Some(true)), Some(Navigation::Listing));
        assert_eq!(ctl.close_target(None), Some(Navigation::Reload(Mode::Create)));
        assert_eq!(ctl.dialog(), Some(&Dialog::created()));
        assert_eq!(ctl.form().value(Field::Title), "Paddington 2");

        assert_eq!(ctl.close_dialog(None), Some(Navigation::Reload(Mode::Create)));
        assert!(ctl.dialog().is_none());
        assert_eq!(ctl.form().values(), &FormValues::default());
    }

    #[test]
    fn navigation_targets_resolve_to_routes() {
        assert_eq!(Navigation::Listing.href(), "/movies");
        assert_eq!(Navigation::NewForm.href(), "/movies/new");
        assert_eq!(Navigation::Reload(Mode::Edit(3)).href(), "/movies/3/edit");
    }
}
