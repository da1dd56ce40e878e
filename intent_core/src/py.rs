//! Python bindings for the intent container using PyO3

use pyo3::prelude::*;
use pyo3::types::PyDict;
use crate::container::IntentContainer;
use crate::types::IntentMatch;

fn match_to_dict<'py>(py: Python<'py>, matched: &IntentMatch) -> PyResult<Bound<'py, PyDict>> {
    let entities = PyDict::new_bound(py);
    for (name, value) in &matched.entities {
        entities.set_item(name, value)?;
    }

    let dict = PyDict::new_bound(py);
    dict.set_item("name", &matched.name)?;
    dict.set_item("entities", entities)?;
    Ok(dict)
}

/// Python wrapper for the intent container
#[pyclass(name = "IntentContainer")]
pub struct PyIntentContainer {
    inner: IntentContainer,
}

#[pymethods]
impl PyIntentContainer {
    #[new]
    fn new() -> Self {
        Self {
            inner: IntentContainer::new(),
        }
    }

    /// Register an intent with its templates
    fn add_intent(&self, name: String, lines: Vec<String>) {
        self.inner.register_intent(name, &lines);
    }

    fn remove_intent(&self, name: &str) {
        self.inner.unregister_intent(name);
    }

    /// Register an entity with its literal lines
    fn add_entity(&self, name: String, lines: Vec<String>) {
        self.inner.register_entity(name, &lines);
    }

    fn remove_entity(&self, name: &str) {
        self.inner.unregister_entity(name);
    }

    fn compile(&self) {
        self.inner.compile();
    }

    /// Best match as `{"name": str | None, "entities": dict}`
    fn calc_intent<'py>(&self, query: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let matched = py.allow_threads(|| self.inner.resolve(query));
        match_to_dict(py, &matched)
    }

    /// Best match of every matching intent
    fn calc_intents<'py>(&self, query: &str, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let matches = py.allow_threads(|| self.inner.match_all(query));
        matches.iter().map(|m| match_to_dict(py, m)).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}
