//! Shared documents for integration tests

#![allow(dead_code)]

use xmlpath::XmlPath;

pub const SHOPPING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<shopping>
    <category type="groceries">
        <item>
            <name>Chocolate</name>
            <price>10</price>
        </item>
        <item>
            <name>Coffee</name>
            <price>20</price>
        </item>
    </category>
    <category type="supplies">
        <item>
            <name>Paper</name>
            <price>5</price>
        </item>
        <item quantity="4">
            <name>Pens</name>
            <price>15.5</price>
        </item>
    </category>
    <category type="present">
        <item when="Aug 10">
            <name>Kathryn's Birthday</name>
            <price>200</price>
        </item>
    </category>
</shopping>"#;

pub const SINGLE_CATEGORY: &str = r#"<shopping>
    <category type="groceries">
        <item><name>Chocolate</name><price>10</price></item>
        <item><name>Coffee</name><price>20</price></item>
        <item><name>Tea</name><price>7</price></item>
    </category>
</shopping>"#;

pub fn shopping() -> XmlPath {
    XmlPath::new(SHOPPING).expect("shopping document parses")
}
