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

//! toInteger() function - converts value to a 32-bit integer

use crate::model::type_coercion::parse_integer;
use crate::model::{TypeInfo, XmlPathValue};
use crate::registry::function::{EvaluationContext, FunctionResult, XmlPathFunction};
use crate::registry::signature::FunctionSignature;

/// toInteger() function - converts value to a 32-bit integer
pub struct ToIntegerFunction;

impl XmlPathFunction for ToIntegerFunction {
    fn name(&self) -> &str {
        "toInteger"
    }
    fn human_friendly_name(&self) -> &str {
        "To Integer"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> =
            std::sync::LazyLock::new(|| FunctionSignature::new("toInteger", TypeInfo::Integer));
        &SIG
    }

    fn documentation(&self) -> &str {
        "Returns the single current value as an integer. Text with a fractional part, out of range text and non-numeric text are errors."
    }

    fn evaluate(&self, context: &EvaluationContext) -> FunctionResult<XmlPathValue> {
        let (min, max) = (i64::from(i32::MIN), i64::from(i32::MAX));
        super::convert(
            self.name(),
            "int",
            &context.input,
            |value, target| parse_integer(value, target, min, max),
            XmlPathValue::Integer,
        )
    }
}
