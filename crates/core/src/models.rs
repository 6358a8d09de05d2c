use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire-level role string expected by the chat-completion endpoint.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

impl fmt::Display for PropertyDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            " * Name: {} * Type: {} * Description: {}",
            self.name, self.type_name, self.description
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    pub class_name: String,
    pub description: String,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl fmt::Display for SchemaDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, " * Class Name: {}", self.class_name)?;
        writeln!(formatter, " * Description: {}", self.description)?;
        writeln!(formatter, " * Properties:")?;
        for property in &self.properties {
            writeln!(formatter, "   {property}")?;
        }
        Ok(())
    }
}

/// Root document of the bundled schema corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaCatalog {
    #[serde(default)]
    pub data: Vec<SchemaDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    pub class_name: String,
    pub route: String,
    pub route_signature: String,
    pub operation_id: String,
    pub verb: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub response_code: u16,
    pub response_type: String,
}

impl fmt::Display for RouteDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "# API Route Name: {}", self.class_name)?;
        writeln!(formatter, "* API Route Signature: {}", self.route_signature)?;
        writeln!(formatter, "* Description: {}", self.description)?;
        writeln!(formatter, "* ResponseType: {}", self.response_type)?;
        writeln!(formatter, "---")
    }
}

/// Shape of the model reply requested from the generation phase.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    #[default]
    Conversational,
    JsonOnly,
    XmlOnly,
    TabularQuery,
}

impl ResponseFormat {
    /// Which of the two bundled full-reference documents grounds this format.
    pub fn documentation_format(self) -> DocumentationFormat {
        match self {
            ResponseFormat::JsonOnly => DocumentationFormat::Json,
            ResponseFormat::XmlOnly
            | ResponseFormat::Conversational
            | ResponseFormat::TabularQuery => DocumentationFormat::Xml,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentationFormat {
    Json,
    Xml,
}

/// Entity names recovered from the extraction phase reply.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ExtractionResult {
    pub routes: Vec<String>,
    pub schemas: Vec<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.schemas.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AskRequest {
    pub question: String,
    pub include_grounding: bool,
    pub history: Vec<ChatMessage>,
    pub format: ResponseFormat,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            include_grounding: true,
            history: Vec::new(),
            format: ResponseFormat::Conversational,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_maps_to_wire_strings() {
        assert_eq!(Role::System.as_wire_str(), "system");
        assert_eq!(Role::User.as_wire_str(), "user");
        assert_eq!(Role::Assistant.as_wire_str(), "assistant");
    }

    #[test]
    fn schema_definition_renders_properties_in_order() {
        let schema = SchemaDefinition {
            class_name: "Employee".to_string(),
            description: "An employed individual.".to_string(),
            properties: vec![
                PropertyDefinition {
                    name: "FirstName".to_string(),
                    type_name: "String".to_string(),
                    description: "First name.".to_string(),
                },
                PropertyDefinition {
                    name: "LastName".to_string(),
                    type_name: "String".to_string(),
                    description: "Last name.".to_string(),
                },
            ],
        };

        let rendered = schema.to_string();
        assert!(rendered.contains(" * Class Name: Employee"));
        let first = rendered.find("FirstName").expect("first property rendered");
        let last = rendered.find("LastName").expect("second property rendered");
        assert!(first < last);
    }

    #[test]
    fn route_definition_renders_description_block() {
        let route = RouteDefinition {
            class_name: "Employees".to_string(),
            route: "/Employer/{EmployerId}/Employees".to_string(),
            route_signature: "GET /Employer/[EmployerKey]/Employees".to_string(),
            operation_id: "GetEmployeesFromEmployer".to_string(),
            verb: "GET".to_string(),
            summary: "List employees.".to_string(),
            description: "Returns employee links.".to_string(),
            tags: vec!["Employee".to_string()],
            response_code: 200,
            response_type: "LinkCollection".to_string(),
        };

        let rendered = route.to_string();
        assert!(rendered.starts_with("# API Route Name: Employees"));
        assert!(rendered.contains("* API Route Signature: GET /Employer/[EmployerKey]/Employees"));
        assert!(rendered.trim_end().ends_with("---"));
    }

    #[test]
    fn ask_request_defaults_to_grounded_conversational() {
        let request = AskRequest::new("question");
        assert!(request.include_grounding);
        assert!(request.history.is_empty());
        assert_eq!(request.format, ResponseFormat::Conversational);
    }

    #[test]
    fn json_only_selects_json_documentation() {
        assert_eq!(
            ResponseFormat::JsonOnly.documentation_format(),
            DocumentationFormat::Json
        );
        assert_eq!(
            ResponseFormat::TabularQuery.documentation_format(),
            DocumentationFormat::Xml
        );
    }
}
