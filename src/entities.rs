use chrono::Utc;
use derive_more::From;
use serde::{Deserialize, Serialize};

/// A repeatable name/value annotation attached to items, users, events and
/// recommendation contexts.
///
/// Multiple `NameValue`s may share a name (multimap semantics, not a
/// mapping). The order of values sharing the same name is preserved by the
/// engine; the order among distinct names is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From)]
pub struct NameValue {
    /// The name. Localized variants append a language identifier, for
    /// example `Title_EN`.
    pub name: String,
    /// The value.
    pub value: String,
}

impl NameValue {
    /// Creates a new name/value pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        NameValue {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<(&str, &str)> for NameValue {
    fn from((name, value): (&str, &str)) -> Self {
        NameValue::new(name, value)
    }
}

/// An item is something that can be recommended to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier of the item.
    pub item_id: String,
    /// Short, human-readable name of the item.
    pub title: Option<String>,
    /// The item family, used to group items sharing the same name/value
    /// properties. For example `Book` or `Ticket`.
    pub item_type: Option<String>,
    /// A hidden item is never recommended.
    pub hidden: bool,
    /// The item is never recommended before this date (epoch seconds).
    pub from_date: i64,
    /// The item is never recommended after this date (epoch seconds).
    pub to_date: i64,
    /// Additional description of the item, for example `CategoryPath`,
    /// `Tags`, `Price`. The engine accepts arbitrary names.
    pub name_values: Vec<NameValue>,
}

impl Item {
    /// `to_date` value meaning the recommendability window never closes.
    pub const TO_DATE_ALWAYS: i64 = 2147483647;

    /// Creates an item that is always recommendable (`from_date` 0,
    /// `to_date` [`Item::TO_DATE_ALWAYS`]).
    pub fn new(item_id: impl Into<String>) -> Self {
        Item {
            item_id: item_id.into(),
            title: None,
            item_type: None,
            hidden: false,
            from_date: 0,
            to_date: Self::TO_DATE_ALWAYS,
            name_values: Vec::new(),
        }
    }
}

/// A user of the recommendation system: an entity that generates events and
/// can receive recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of a registered user.
    pub user_id: String,
    /// A user that no longer exists should be set to hidden.
    pub hidden: bool,
    /// Additional description of the user, for example `ZipCode`, `City`,
    /// `Country`.
    pub name_values: Vec<NameValue>,
}

impl User {
    /// Creates a visible user with no name/value annotations.
    pub fn new(user_id: impl Into<String>) -> Self {
        User {
            user_id: user_id.into(),
            hidden: false,
            name_values: Vec::new(),
        }
    }
}

/// Well-known event type names.
///
/// The set of valid event types is defined and extended by the remote engine,
/// so [`Event::event_type`] stays an open string; these constants only cover
/// the common general-purpose types.
pub mod event_type {
    /// The user viewed the info page of an item.
    pub const VIEW: &str = "VIEW";
    /// The user bought an item. Name/values: `OrderId`, `UnitPrice`,
    /// `Currency`, `Quantity`.
    pub const BUY: &str = "BUY";
    /// The user rated an item. Name/values: `Value`.
    pub const RATING: &str = "RATING";
    /// The user added an item to the shopping cart. Name/values: `Quantity`.
    pub const ADD_TO_CART: &str = "ADD_TO_CART";
    /// The user removed an item from the shopping cart.
    pub const REMOVE_FROM_CART: &str = "REMOVE_FROM_CART";
    /// The user clicked on a recommended item. Name/values: `Position`
    /// (1-based position in the recommendation list).
    pub const REC_CLICK: &str = "REC_CLICK";
    /// The user logged in. Both `cookieId` and `userId` must be specified.
    pub const LOGIN: &str = "LOGIN";
}

/// An event generated by a user, for example a user viewed an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// The event type, an open string; see [`event_type`] for common values.
    /// The type determines which name/values can be passed.
    pub event_type: String,
    /// Identifier of the item the user interacted with. `None` when it does
    /// not make sense, for example for a login event.
    pub item_id: Option<String>,
    /// Identifier of a previous recommendation, when this event is a
    /// consequence of one.
    pub recommendation_id: Option<String>,
    /// When the event happened (epoch seconds).
    pub time: i64,
    /// Identifier of the user who generated the event. `None` when unknown,
    /// for example when the user is not logged in yet.
    pub user_id: Option<String>,
    /// Permanent identifier of the end user's computer, preserved across
    /// browser sessions. Should always be specified.
    pub cookie_id: Option<String>,
    /// Additional description of the event; the allowed names depend on the
    /// event type.
    pub name_values: Vec<NameValue>,
}

impl Event {
    /// Creates an event timestamped with the current time.
    pub fn new(event_type: impl Into<String>) -> Self {
        Event {
            event_type: event_type.into(),
            item_id: None,
            recommendation_id: None,
            time: Utc::now().timestamp(),
            user_id: None,
            cookie_id: None,
            name_values: Vec::new(),
        }
    }
}

/// Describes a recommendation request: which scenario to run and with which
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    /// The time when the recommendation will be shown to the end user
    /// (epoch seconds).
    pub recommendation_time: i64,
    /// Maximum number of items in the result. 0 lets the scenario decide.
    pub number_limit: i32,
    /// The scenario to run. Scenarios are defined by the scenario management
    /// API and describe how recommended items are filtered and ordered.
    pub scenario_id: String,
    /// Scenario parameters, for example `CurrentItemId`, `ItemOnPage`,
    /// `Filter.*`. The allowed names depend on the scenario.
    pub name_values: Vec<NameValue>,
    /// Which name/values of the recommended items to include in the result.
    /// `None` lets the scenario decide.
    pub result_name_values: Option<Vec<NameValue>>,
    /// Identifier of the logged-in user. Overwritten by the bulk
    /// recommendation call with its own argument.
    pub user_id: Option<String>,
    /// Permanent identifier of the end user's computer. Overwritten by the
    /// bulk recommendation call with its own argument.
    pub cookie_id: Option<String>,
}

impl RecommendationContext {
    /// Creates a context for the given scenario, timestamped with the
    /// current time and leaving the result size and fields to the scenario.
    pub fn new(scenario_id: impl Into<String>) -> Self {
        RecommendationContext {
            recommendation_time: Utc::now().timestamp(),
            number_limit: 0,
            scenario_id: scenario_id.into(),
            name_values: Vec::new(),
            result_name_values: None,
            user_id: None,
            cookie_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn item_serializes_with_wire_field_names() {
        let mut item = Item::new("item-1");
        item.item_type = Some("Book".to_owned());
        item.name_values.push(("CategoryPath", "books/databases").into());
        item.name_values.push(("Tags", "sql").into());

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "itemId": "item-1",
                "title": null,
                "itemType": "Book",
                "hidden": false,
                "fromDate": 0,
                "toDate": 2147483647,
                "nameValues": [
                    {"name": "CategoryPath", "value": "books/databases"},
                    {"name": "Tags", "value": "sql"},
                ],
            })
        );
    }

    #[test]
    fn values_sharing_a_name_keep_their_order() {
        let mut event = Event::new(event_type::BUY);
        event.name_values.push(("Tags", "first").into());
        event.name_values.push(("Tags", "second").into());
        event.name_values.push(("Tags", "third").into());

        let body = serde_json::to_value(&event).unwrap();
        let values: Vec<&str> = body["nameValues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|nv| nv["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, ["first", "second", "third"]);
    }

    #[test]
    fn event_defaults_to_construction_time() {
        let before = Utc::now().timestamp();
        let event = Event::new(event_type::VIEW);
        let after = Utc::now().timestamp();
        assert!(event.time >= before && event.time <= after);
    }

    #[test]
    fn absent_optional_fields_serialize_as_null() {
        let context = RecommendationContext::new("HOMEPAGE");
        let body = serde_json::to_value(&context).unwrap();
        assert!(body["resultNameValues"].is_null());
        assert!(body["userId"].is_null());
        assert!(body["cookieId"].is_null());
        assert_eq!(body["numberLimit"], 0);
    }
}
