// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! children() function - returns the direct children of every member

use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// children() function - returns the direct children of every member
pub struct ChildrenFunction;

impl XmlPathFunction for ChildrenFunction {
    fn name(&self) -> &str {
        "children"
    }
    fn human_friendly_name(&self) -> &str {
        "Children"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new("children", TypeInfo::NodeCollection)
        });
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the direct child elements of the current node, or of every node in the current collection, in document order."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        let children = match &context.input {
            XmlPathValue::Empty => Vec::new(),
            XmlPathValue::Node(node) => node.children().to_vec(),
            XmlPathValue::Nodes(nodes) => nodes
                .iter()
                .flat_map(|node| node.children().iter().cloned())
                .collect(),
            other => {
                return Err(
                    self.invalid_input(format!("{} values have no children", other.type_name()))
                );
            }
        };
        Ok(XmlPathValue::from_nodes(children))
    }
}
