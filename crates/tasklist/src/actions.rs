use crate::domain_models::{ListId, ThemeName, TodoId, TodoRef};
use crate::error::DispatchError;
use crate::state::EditTarget;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Name of an action, as used in named action records (`ADD_LIST`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AddList,
    SelectList,
    EditList,
    DeleteList,
    AddTodo,
    EditTodo,
    DeleteTodo,
    ToggleTodo,
    ChangeTheme,
    BackHome,
    BeginEditing,
    CancelEditing,
}

/// User intents routed through the dispatcher. Each maps to exactly one
/// store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddList { name: String },
    SelectList { id: ListId },
    EditList { id: ListId, new_name: String },
    DeleteList { id: ListId },
    AddTodo { text: String },
    EditTodo { todo: TodoRef, new_text: String },
    DeleteTodo { todo: TodoRef },
    ToggleTodo { todo: TodoRef, completed: bool },
    ChangeTheme { theme: ThemeName },
    /// Leave the list view without touching any data
    BackHome,
    BeginEditing { target: EditTarget },
    CancelEditing,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::AddList { .. } => ActionType::AddList,
            Self::SelectList { .. } => ActionType::SelectList,
            Self::EditList { .. } => ActionType::EditList,
            Self::DeleteList { .. } => ActionType::DeleteList,
            Self::AddTodo { .. } => ActionType::AddTodo,
            Self::EditTodo { .. } => ActionType::EditTodo,
            Self::DeleteTodo { .. } => ActionType::DeleteTodo,
            Self::ToggleTodo { .. } => ActionType::ToggleTodo,
            Self::ChangeTheme { .. } => ActionType::ChangeTheme,
            Self::BackHome => ActionType::BackHome,
            Self::BeginEditing { .. } => ActionType::BeginEditing,
            Self::CancelEditing => ActionType::CancelEditing,
        }
    }

    /// Build an action from a named record such as
    /// `("TOGGLE_TODO", {"index": 0, "completed": true})`.
    ///
    /// Todo references accept either `"id"` or `"index"`; list ids may be
    /// strings or numbers.
    pub fn from_record(action_type: &str, payload: &Value) -> Result<Self, DispatchError> {
        let kind = ActionType::from_str(action_type)
            .map_err(|_| DispatchError::UnknownAction(action_type.to_string()))?;
        let fields = Payload { kind, value: payload };

        let action = match kind {
            ActionType::AddList => Self::AddList {
                name: fields.string("name")?,
            },
            ActionType::SelectList => Self::SelectList {
                id: fields.list_id("id")?,
            },
            ActionType::EditList => Self::EditList {
                id: fields.list_id("id")?,
                new_name: fields.string("newName")?,
            },
            ActionType::DeleteList => Self::DeleteList {
                id: fields.list_id("id")?,
            },
            ActionType::AddTodo => Self::AddTodo {
                text: fields.string("text")?,
            },
            ActionType::EditTodo => Self::EditTodo {
                todo: fields.todo_ref()?,
                new_text: fields.string("newText")?,
            },
            ActionType::DeleteTodo => Self::DeleteTodo {
                todo: fields.todo_ref()?,
            },
            ActionType::ToggleTodo => Self::ToggleTodo {
                todo: fields.todo_ref()?,
                completed: fields.bool("completed")?,
            },
            ActionType::ChangeTheme => {
                let theme = fields.string("theme")?;
                Self::ChangeTheme {
                    theme: theme
                        .parse()
                        .map_err(|_| fields.invalid(format!("unknown theme '{}'", theme)))?,
                }
            }
            ActionType::BackHome => Self::BackHome,
            ActionType::BeginEditing => {
                let target = match fields.string("kind")?.as_str() {
                    "list" => EditTarget::List(fields.list_id("id")?),
                    "todo" => EditTarget::Todo(fields.todo_ref()?),
                    other => return Err(fields.invalid(format!("unknown edit kind '{}'", other))),
                };
                Self::BeginEditing { target }
            }
            ActionType::CancelEditing => Self::CancelEditing,
        };

        Ok(action)
    }
}

/// Field accessors over a payload object, producing `InvalidPayload` errors
struct Payload<'a> {
    kind: ActionType,
    value: &'a Value,
}

impl Payload<'_> {
    fn invalid(&self, reason: impl Into<String>) -> DispatchError {
        DispatchError::InvalidPayload {
            action: self.kind,
            reason: reason.into(),
        }
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.value.get(name).filter(|v| !v.is_null())
    }

    fn string(&self, name: &str) -> Result<String, DispatchError> {
        match self.field(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.invalid(format!("field '{}' must be a string", name))),
            None => Err(self.invalid(format!("missing field '{}'", name))),
        }
    }

    fn bool(&self, name: &str) -> Result<bool, DispatchError> {
        match self.field(name) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.invalid(format!("field '{}' must be a boolean", name))),
            None => Err(self.invalid(format!("missing field '{}'", name))),
        }
    }

    fn list_id(&self, name: &str) -> Result<ListId, DispatchError> {
        match self.field(name) {
            Some(Value::String(s)) => Ok(ListId::from(s.as_str())),
            Some(Value::Number(n)) => Ok(ListId::from(n.to_string())),
            Some(_) => Err(self.invalid(format!("field '{}' must be an id", name))),
            None => Err(self.invalid(format!("missing field '{}'", name))),
        }
    }

    fn todo_ref(&self) -> Result<TodoRef, DispatchError> {
        if let Some(id) = self.field("id") {
            return match id {
                Value::String(s) => Ok(TodoRef::Id(TodoId::from(s.as_str()))),
                _ => Err(self.invalid("field 'id' must be a string")),
            };
        }
        match self.field("index") {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(TodoRef::Index)
                .ok_or_else(|| self.invalid("field 'index' must be a non-negative integer")),
            Some(_) => Err(self.invalid("field 'index' must be a number")),
            None => Err(self.invalid("missing field 'id' or 'index'")),
        }
    }
}

/// What a committed action changed, handed to hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    ListAdded { id: ListId, name: String },
    ListSelected { id: ListId },
    ListRenamed { id: ListId, name: String },
    ListDeleted { id: ListId, name: String },
    TodoAdded { list_id: ListId, todo_id: TodoId },
    TodoEdited { todo_id: TodoId, text: String },
    TodoDeleted { todo_id: TodoId, index: usize },
    TodoToggled { todo_id: TodoId, completed: bool },
    ThemeChanged { theme: ThemeName },
    WentHome,
    EditingStarted { target: EditTarget },
    EditingCancelled,
}

impl ActionOutcome {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::ListAdded { .. } => ActionType::AddList,
            Self::ListSelected { .. } => ActionType::SelectList,
            Self::ListRenamed { .. } => ActionType::EditList,
            Self::ListDeleted { .. } => ActionType::DeleteList,
            Self::TodoAdded { .. } => ActionType::AddTodo,
            Self::TodoEdited { .. } => ActionType::EditTodo,
            Self::TodoDeleted { .. } => ActionType::DeleteTodo,
            Self::TodoToggled { .. } => ActionType::ToggleTodo,
            Self::ThemeChanged { .. } => ActionType::ChangeTheme,
            Self::WentHome => ActionType::BackHome,
            Self::EditingStarted { .. } => ActionType::BeginEditing,
            Self::EditingCancelled => ActionType::CancelEditing,
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListAdded { id, name } => write!(f, "added list {} '{}'", id, name),
            Self::ListSelected { id } => write!(f, "selected list {}", id),
            Self::ListRenamed { id, name } => write!(f, "renamed list {} to '{}'", id, name),
            Self::ListDeleted { id, name } => write!(f, "deleted list {} '{}'", id, name),
            Self::TodoAdded { list_id, todo_id } => {
                write!(f, "added todo {} to list {}", todo_id, list_id)
            }
            Self::TodoEdited { todo_id, text } => write!(f, "edited todo {}: '{}'", todo_id, text),
            Self::TodoDeleted { todo_id, index } => {
                write!(f, "deleted todo {} at index {}", todo_id, index)
            }
            Self::TodoToggled { todo_id, completed } => {
                write!(f, "set todo {} completed={}", todo_id, completed)
            }
            Self::ThemeChanged { theme } => write!(f, "theme is now {}", theme),
            Self::WentHome => write!(f, "back to homepage"),
            Self::EditingStarted { target } => match target {
                EditTarget::List(id) => write!(f, "editing list {}", id),
                EditTarget::Todo(todo) => write!(f, "editing todo {}", todo),
            },
            Self::EditingCancelled => write!(f, "editing cancelled"),
        }
    }
}
