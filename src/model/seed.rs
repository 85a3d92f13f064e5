use super::*;
use serde_json::json;

/// Builds the built-in sample document.
///
pub(super) fn initial_data() -> AppState {
    AppState {
        entities: vec![
            EntityItem {
                id: "e1".to_string(),
                name: "User".to_string(),
                description: Some("System users".into()),
                table_name: "users".to_string(),
                timestamps: true,
                soft_deletes: false,
                fields: vec![
                    FieldItem {
                        primary_key: Some(true),
                        required: Some(true),
                        ..FieldItem::new("id", FieldType::Uuid)
                    },
                    FieldItem {
                        unique: Some(true),
                        required: Some(true),
                        validation: Some(ValidationRules {
                            email: Some(true),
                            ..ValidationRules::default()
                        }),
                        ..FieldItem::new("email", FieldType::String)
                    },
                    FieldItem {
                        required: Some(true),
                        ..FieldItem::new("password_hash", FieldType::String)
                    },
                ],
                relations: vec![RelationItem {
                    relation_type: RelationType::HasMany,
                    target_entity: "Post".to_string(),
                    source_field: "id".to_string(),
                    target_field: "user_id".to_string(),
                    on_delete: Some(ReferentialAction::Cascade),
                    on_update: None,
                    via_table: None,
                }],
                hooks: None,
            },
            EntityItem {
                id: "e2".to_string(),
                name: "Product".to_string(),
                description: Some("Inventory items".into()),
                table_name: "products".to_string(),
                timestamps: true,
                soft_deletes: true,
                fields: vec![
                    FieldItem {
                        unique: Some(true),
                        required: Some(true),
                        validation: Some(ValidationRules {
                            pattern: Some("^[A-Z0-9-]{5,10}$".to_string()),
                            ..ValidationRules::default()
                        }),
                        ..FieldItem::new("sku", FieldType::String)
                    },
                    FieldItem {
                        required: Some(true),
                        default: Some(json!(0)),
                        validation: Some(ValidationRules {
                            min_value: Some(0.0),
                            ..ValidationRules::default()
                        }),
                        ..FieldItem::new("price", FieldType::Decimal)
                    },
                ],
                relations: vec![],
                hooks: None,
            },
        ],
        actions: vec![ActionNode::Group(GroupItem {
            id: "g1".to_string(),
            name: "auth".to_string(),
            description: None,
            route_suffix: "/auth".to_string(),
            actions: vec![ActionNode::Action(ActionItem {
                id: "a1".to_string(),
                name: "registerUser".to_string(),
                description: Some("Registers a new user".into()),
                route: Some("/register".to_string()),
                parameters: vec![ParameterItem {
                    name: "email".to_string(),
                    location: ParameterLocation::Query,
                    description: Some("User email".to_string()),
                    required: true,
                    schema: None,
                }],
                use_services: vec!["EmailSender".to_string()],
                response_format: Some(ResponseFormat::Json),
                access: vec![],
                view: None,
            })],
        })],
        data_sources: vec![DataSourceItem {
            id: "d1".to_string(),
            name: "MainDB".to_string(),
            description: Some("Primary DB".into()),
            source_type: DataSourceType::Database,
            config: json!({ "host": "localhost", "port": 5432 })
                .as_object()
                .cloned()
                .unwrap_or_default(),
        }],
        services: vec![ServiceItem {
            id: "s1".to_string(),
            name: "EmailSender".to_string(),
            title: "Email Service".to_string(),
            description: Some("Handles SMTP email delivery".into()),
        }],
        environment: vec![EnvironmentItem {
            id: "v1".to_string(),
            name: "API_KEY".to_string(),
            description: Some("Stripe Secret Key".into()),
            required: true,
            default: Some(String::new()),
        }],
        access_control: vec![RoleItem {
            id: "r1".to_string(),
            name: "Admin".to_string(),
            description: Some("Full access".into()),
            permissions: vec!["create_user".to_string(), "delete_product".to_string()],
        }],
    }
}
