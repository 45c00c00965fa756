use yew::prelude::*;

/// Submission feedback shared by the dashboard forms.
#[derive(Clone)]
pub struct FormState {
    pub error: String,
    pub success: String,
    pub submitting: bool,
    pub handle_start: Callback<()>,
    pub handle_success: Callback<String>,
    pub handle_error: Callback<String>,
}

#[hook]
pub fn use_form_state() -> FormState {
    let error = use_state(String::new);
    let success = use_state(String::new);
    let submitting = use_state(|| false);

    let handle_start = {
        let error = error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        Callback::from(move |_| {
            submitting.set(true);
            error.set(String::new());
            success.set(String::new());
        })
    };

    let handle_success = {
        let success = success.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |msg: String| {
            submitting.set(false);
            success.set(msg);
            error.set(String::new());
        })
    };

    let handle_error = {
        let error = error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        Callback::from(move |msg: String| {
            submitting.set(false);
            error.set(msg);
            success.set(String::new());
        })
    };

    FormState {
        error: (*error).clone(),
        success: (*success).clone(),
        submitting: *submitting,
        handle_start,
        handle_success,
        handle_error,
    }
}
