use std::collections::HashMap;

use crate::object::Value;

type Objects = HashMap<String, Value>;

/// A variable table: the global symbol table or one call frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
  pub objects: Objects,
}

impl Env {
  pub fn new() -> Self {
    Self {
      objects: HashMap::new(),
    }
  }

  /// Builds the frame for a call: a copy of the globals, overlaid by a copy of the
  /// caller's frame, overlaid by the bound parameters. Later writes to either source
  /// are not seen by the new frame.
  pub fn for_call(globals: &Env, caller: Option<&Env>, params: Vec<(String, Value)>) -> Self {
    let mut objects = globals.objects.clone();

    if let Some(caller) = caller {
      objects.extend(caller.objects.iter().map(|(name, value)| (name.clone(), value.clone())));
    }

    objects.extend(params);

    Self {
      objects,
    }
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.objects.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.objects.contains_key(name)
  }

  pub fn set(&mut self, name: &str, value: Value) {
    self.objects.insert(name.to_owned(), value);
  }
}
