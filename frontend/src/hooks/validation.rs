use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use shared::validation::{validate_form, ConstraintTable, FormValidation};
use yew::prelude::*;

/// Values, validation result and input callbacks for a constraint-driven form.
#[derive(Clone)]
pub struct ValidatedForm {
    pub values: BTreeMap<String, String>,
    pub validation: FormValidation,
    touched: BTreeSet<String>,
    show_all: bool,
    pub on_input: Callback<(String, String)>,
    pub reveal_errors: Callback<()>,
    pub reset: Callback<()>,
}

impl ValidatedForm {
    pub fn value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    /// Errors stay hidden until the field is edited or a submit is attempted.
    pub fn visible_error(&self, field: &str) -> Option<String> {
        if self.show_all || self.touched.contains(field) {
            self.validation.error_for(field).map(str::to_string)
        } else {
            None
        }
    }
}

#[hook]
pub fn use_validated_form(table: Rc<ConstraintTable>) -> ValidatedForm {
    let values = use_state(BTreeMap::<String, String>::new);
    let touched = use_state(BTreeSet::<String>::new);
    let show_all = use_state(|| false);

    let on_input = {
        let values = values.clone();
        let touched = touched.clone();
        Callback::from(move |(field, value): (String, String)| {
            let mut next = (*values).clone();
            next.insert(field.clone(), value);
            values.set(next);

            let mut seen = (*touched).clone();
            seen.insert(field);
            touched.set(seen);
        })
    };

    let reveal_errors = {
        let show_all = show_all.clone();
        Callback::from(move |_| show_all.set(true))
    };

    let reset = {
        let values = values.clone();
        let touched = touched.clone();
        let show_all = show_all.clone();
        Callback::from(move |_| {
            values.set(BTreeMap::new());
            touched.set(BTreeSet::new());
            show_all.set(false);
        })
    };

    ValidatedForm {
        validation: validate_form(&values, &table),
        values: (*values).clone(),
        touched: (*touched).clone(),
        show_all: *show_all,
        on_input,
        reveal_errors,
        reset,
    }
}
